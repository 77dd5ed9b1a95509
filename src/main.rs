use log::error;

use crate::expense_table::ExpenseTable;

mod coercion;
mod csv_handler;
mod error;
mod expense_table;

fn main() {
    env_logger::init();
    let path = std::env::args().nth(1).expect("Please provide a file path as the first argument");

    match ExpenseTable::load(&path) {
        Ok(table) => print!("{}", table.summary()),
        Err(err) => {
            error!("failed to load expenses: {err}");
            std::process::exit(1);
        }
    }
}
