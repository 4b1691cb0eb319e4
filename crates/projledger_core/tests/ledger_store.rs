use chrono::NaiveDate;
use projledger_core::{
    CommandOutcome, LedgerCommand, LedgerStore, PortfolioSnapshot, ProjectStatus, StoreError,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::cell::RefCell;
use std::rc::Rc;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 2).unwrap()
}

fn create_project(store: &mut LedgerStore, budget: Decimal) -> String {
    match store
        .apply(LedgerCommand::CreateProject {
            name: "  Mobile app ".to_string(),
            client: "Acme".to_string(),
            budget,
            created_at: today(),
        })
        .unwrap()
    {
        CommandOutcome::ProjectCreated { project_id } => project_id,
        other => panic!("unexpected outcome: {other:?}"),
    }
}

fn add_contractor(store: &mut LedgerStore, rate: Decimal) -> String {
    match store
        .apply(LedgerCommand::AddContractor {
            name: "Ann".to_string(),
            role: String::new(),
            rate,
        })
        .unwrap()
    {
        CommandOutcome::ContractorAdded { contractor_id } => contractor_id,
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn create_project_trims_fields_and_starts_active() {
    let mut store = LedgerStore::new();
    let project_id = create_project(&mut store, dec!(1000));

    let project = store.snapshot().project(&project_id).unwrap();
    assert_eq!(project.name, "Mobile app");
    assert_eq!(project.status, ProjectStatus::Active);
    assert!(project.assignments.is_empty());
}

#[test]
fn blank_fields_are_rejected_without_mutation() {
    let mut store = LedgerStore::new();
    let err = store
        .apply(LedgerCommand::CreateProject {
            name: "   ".to_string(),
            client: "Acme".to_string(),
            budget: dec!(1),
            created_at: today(),
        })
        .unwrap_err();
    assert_eq!(err, StoreError::MissingField("name"));
    assert!(store.snapshot().projects.is_empty());
}

#[test]
fn assignment_and_expense_flow_updates_costs() {
    let mut store = LedgerStore::new();
    let project_id = create_project(&mut store, dec!(100000));
    let contractor_id = add_contractor(&mut store, dec!(1500));

    store
        .apply(LedgerCommand::AddAssignment {
            project_id: project_id.clone(),
            contractor_id,
            hours: dec!(20),
        })
        .unwrap();
    let expense = store
        .apply(LedgerCommand::AddExpense {
            project_id: project_id.clone(),
            description: "Domain".to_string(),
            amount: dec!(2000),
            category: "Infrastructure".to_string(),
            date: today(),
        })
        .unwrap();

    let costs = store.project_costs(&project_id).unwrap();
    assert_eq!(costs.contractor_cost, dec!(30000));
    assert_eq!(costs.total_cost, dec!(32000));
    assert_eq!(costs.profit, dec!(68000));

    let entry_id = match expense {
        CommandOutcome::ExpenseAdded { entry_id, .. } => entry_id,
        other => panic!("unexpected outcome: {other:?}"),
    };
    store
        .apply(LedgerCommand::RemoveExpense {
            project_id: project_id.clone(),
            entry_id,
        })
        .unwrap();
    assert_eq!(
        store.project_costs(&project_id).unwrap().total_cost,
        dec!(30000)
    );
}

#[test]
fn non_positive_expense_amount_is_rejected() {
    let mut store = LedgerStore::new();
    let project_id = create_project(&mut store, dec!(100));
    let err = store
        .apply(LedgerCommand::AddExpense {
            project_id,
            description: "Free".to_string(),
            amount: Decimal::ZERO,
            category: "Misc".to_string(),
            date: today(),
        })
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::InvalidAmount {
            field: "amount",
            value: Decimal::ZERO
        }
    );
}

#[test]
fn assignment_requires_known_contractor() {
    let mut store = LedgerStore::new();
    let project_id = create_project(&mut store, dec!(100));
    let err = store
        .apply(LedgerCommand::AddAssignment {
            project_id,
            contractor_id: "nobody".to_string(),
            hours: dec!(1),
        })
        .unwrap_err();
    assert_eq!(err, StoreError::ContractorNotFound("nobody".to_string()));
}

#[test]
fn assignment_requires_positive_hours() {
    let mut store = LedgerStore::new();
    let project_id = create_project(&mut store, dec!(100));
    let contractor_id = add_contractor(&mut store, dec!(100));
    let err = store
        .apply(LedgerCommand::AddAssignment {
            project_id: project_id.clone(),
            contractor_id,
            hours: Decimal::ZERO,
        })
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::InvalidAmount {
            field: "hours",
            value: Decimal::ZERO
        }
    );
    assert!(store.snapshot().project(&project_id).unwrap().assignments.is_empty());
}

#[test]
fn removing_contractor_leaves_dangling_assignments_at_zero_cost() {
    let mut store = LedgerStore::new();
    let project_id = create_project(&mut store, dec!(10000));
    let contractor_id = add_contractor(&mut store, dec!(100));
    store
        .apply(LedgerCommand::AddAssignment {
            project_id: project_id.clone(),
            contractor_id: contractor_id.clone(),
            hours: dec!(5),
        })
        .unwrap();

    let outcome = store
        .apply(LedgerCommand::RemoveContractor {
            contractor_id: contractor_id.clone(),
        })
        .unwrap();
    assert_eq!(
        outcome,
        CommandOutcome::ContractorRemoved {
            contractor_id,
            dangling_assignments: 1,
        }
    );
    assert_eq!(
        store.project_costs(&project_id).unwrap().contractor_cost,
        Decimal::ZERO
    );
}

#[test]
fn remove_assignment_checks_index_range() {
    let mut store = LedgerStore::from_snapshot(PortfolioSnapshot::demo());
    let err = store
        .apply(LedgerCommand::RemoveAssignment {
            project_id: "1".to_string(),
            index: 2,
        })
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::AssignmentIndexOutOfRange {
            project_id: "1".to_string(),
            index: 2,
            len: 2,
        }
    );

    store
        .apply(LedgerCommand::RemoveAssignment {
            project_id: "1".to_string(),
            index: 0,
        })
        .unwrap();
    let remaining = &store.snapshot().project("1").unwrap().assignments;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].contractor_id, "2");
}

#[test]
fn completed_project_can_be_reopened() {
    let mut store = LedgerStore::from_snapshot(PortfolioSnapshot::demo());
    for status in [ProjectStatus::Completed, ProjectStatus::Active] {
        store
            .apply(LedgerCommand::UpdateProject {
                project_id: "2".to_string(),
                name: "Law firm site".to_string(),
                client: "PravoConsult".to_string(),
                budget: dec!(300000),
                status,
            })
            .unwrap();
        assert_eq!(store.snapshot().project("2").unwrap().status, status);
    }
}

#[test]
fn observers_see_every_applied_command_but_not_rejections() {
    let seen: Rc<RefCell<Vec<(CommandOutcome, usize)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut store = LedgerStore::from_snapshot(PortfolioSnapshot::demo());
    store.subscribe(Box::new(
        move |outcome: &CommandOutcome, snapshot: &PortfolioSnapshot| {
            sink.borrow_mut()
                .push((outcome.clone(), snapshot.projects.len()));
        },
    ));

    store
        .apply(LedgerCommand::DeleteProject {
            project_id: "1".to_string(),
        })
        .unwrap();
    store
        .apply(LedgerCommand::DeleteProject {
            project_id: "1".to_string(),
        })
        .unwrap_err();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0.project_id(), Some("1"));
    assert_eq!(seen[0].1, 1);
    assert_eq!(store.portfolio_stats().total_budget, dec!(300000));
}

#[test]
fn income_receipts_track_received_and_outstanding() {
    let mut store = LedgerStore::from_snapshot(PortfolioSnapshot::demo());
    store
        .apply(LedgerCommand::AddIncome {
            project_id: "1".to_string(),
            description: "Second payment".to_string(),
            amount: dec!(150000),
            date: today(),
        })
        .unwrap();

    let costs = store.project_costs("1").unwrap();
    assert_eq!(costs.received, dec!(400000));
    assert_eq!(costs.outstanding, dec!(100000));
    assert_eq!(costs.profit, dec!(200000));

    let err = store
        .apply(LedgerCommand::RemoveIncome {
            project_id: "1".to_string(),
            entry_id: "missing".to_string(),
        })
        .unwrap_err();
    assert_eq!(err.code(), "entry_not_found");
}
