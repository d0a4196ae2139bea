pub mod json;
pub mod terminal;

use crate::rules::RunReport;

pub trait Reporter {
    fn report(&self, report: &RunReport) -> String;
}
