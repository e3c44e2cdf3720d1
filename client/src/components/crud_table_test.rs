use super::*;
use crate::net::types::Category;

fn category(name: &str, code: &str, active: bool) -> Category {
    Category { name: name.to_owned(), code: code.to_owned(), is_active: active, ..Category::default() }
}

#[test]
fn row_cells_follow_column_order() {
    let columns = vec![
        Column::new("Code", |c: &Category| c.code.clone()),
        Column::new("Name", |c: &Category| c.name.clone()),
        Column::new("Active", |c: &Category| if c.is_active { "Yes" } else { "No" }.to_owned()),
    ];
    assert_eq!(row_cells(&columns, &category("Travel", "TRV", false)), vec!["TRV", "Travel", "No"]);
}

#[test]
fn empty_columns_yield_no_cells() {
    let columns: Vec<Column<Category>> = Vec::new();
    assert!(row_cells(&columns, &category("Travel", "TRV", true)).is_empty());
}
