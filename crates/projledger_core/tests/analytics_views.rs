use projledger_core::{
    compute_portfolio_stats, contractor_summaries, cost_structure, earnings_share_of_costs,
    status_counts, Assignment, PortfolioSnapshot, ProjectStatus,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn contractor_summaries_count_hours_and_distinct_projects() {
    let mut demo = PortfolioSnapshot::demo();
    demo.projects[0]
        .assignments
        .push(Assignment::new("1", dec!(10)));

    let summaries = contractor_summaries(&demo.projects, &demo.contractors);
    let alexey = &summaries[0];
    assert_eq!(alexey.contractor_id, "1");
    assert_eq!(alexey.total_hours, dec!(150));
    assert_eq!(alexey.total_earned, dec!(375000));
    assert_eq!(alexey.project_count, 2);

    let dmitry = &summaries[2];
    assert_eq!(dmitry.project_count, 1);
    assert_eq!(dmitry.total_earned, dec!(90000));
}

#[test]
fn status_counts_follow_status_changes() {
    let mut demo = PortfolioSnapshot::demo();
    demo.projects[1].status = ProjectStatus::Completed;
    let counts = status_counts(&demo.projects);
    assert_eq!(counts.active, 1);
    assert_eq!(counts.completed, 1);
    assert_eq!(counts.paused, 0);

    demo.projects[1].status = ProjectStatus::Active;
    assert_eq!(status_counts(&demo.projects).active, 2);
}

#[test]
fn cost_structure_splits_budget() {
    let demo = PortfolioSnapshot::demo();
    let structure = cost_structure(&demo.projects, &demo.contractors);

    assert_eq!(structure.total_budget, dec!(800000));
    assert_eq!(structure.contractor_cost, dec!(520000));
    assert_eq!(structure.expense_cost, dec!(35000));
    assert_eq!(structure.profit, dec!(245000));
    assert_eq!(structure.contractor_share, dec!(65));
    assert_eq!(structure.expense_share, dec!(4.375));
    assert_eq!(structure.profit_share, dec!(30.625));
}

#[test]
fn earnings_share_is_relative_to_total_costs() {
    let demo = PortfolioSnapshot::demo();
    let stats = compute_portfolio_stats(&demo.projects, &demo.contractors);
    let shares = earnings_share_of_costs(&stats);

    assert_eq!(shares[0].contractor_id, "1");
    assert_eq!(shares[0].earnings, dec!(350000));
    let total_share = shares
        .iter()
        .map(|share| share.share_of_costs)
        .sum::<Decimal>();
    assert!(total_share < dec!(100));
}

#[test]
fn earnings_share_is_zero_without_costs() {
    let mut demo = PortfolioSnapshot::demo();
    for project in &mut demo.projects {
        project.assignments.clear();
        project.expenses.clear();
    }
    let stats = compute_portfolio_stats(&demo.projects, &demo.contractors);
    assert!(earnings_share_of_costs(&stats)
        .iter()
        .all(|share| share.share_of_costs == Decimal::ZERO));
}
