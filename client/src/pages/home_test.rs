use super::*;

#[test]
fn projection_rows_format_amounts_in_display_order() {
    let projection = Projection {
        grant_id: "g-1".to_owned(),
        grant_total_funds: 100_000.0,
        existing_expense_amount: 25_000.5,
        projected_expense_amount: 10_000.0,
        grant_projected_remaining_funds: 64_999.5,
        grant_current_remaining_funds: 74_999.5,
    };

    let rows = projection_rows(&projection);

    assert_eq!(rows[0], ("Total funds", "100,000.00".to_owned()));
    assert_eq!(rows[1], ("Existing expenses", "25,000.50".to_owned()));
    assert_eq!(rows[3], ("Current remaining", "74,999.50".to_owned()));
    assert_eq!(rows.len(), 5);
}
