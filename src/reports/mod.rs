mod console;
mod csv;

pub use console::generate as generate_console;
pub use csv::generate as generate_csv;
