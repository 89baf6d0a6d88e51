mod csv_formatter;
mod html_formatter;

pub use csv_formatter::CsvFormatter;
pub use html_formatter::HtmlFormatter;
