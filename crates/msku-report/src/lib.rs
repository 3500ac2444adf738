//! Sales reporting over MSKU-mapped order data.
//!
//! Rolls order lines up by MSKU once SKUs have been resolved:
//!
//! - **Sales per MSKU**: total quantity, largest first
//! - **Returns**: quantity of lines whose status is `Returned`
//! - **Trend**: quantity per calendar month

mod date;
mod error;
mod sales;

pub use date::parse_order_date;
pub use error::{ReportError, Result};
pub use sales::{
    MonthTotal, MskuTotal, RETURNED_STATUS, ReportColumns, SalesReport, build_sales_report,
};
