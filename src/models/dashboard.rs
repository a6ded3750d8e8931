//! Rows of the benefits dashboard table, as rendered text.

use serde::{Deserialize, Serialize};

use crate::error::{OracleError, OracleResult};

use super::DisplayedPaycheck;

/// Number of data cells in a dashboard row (the actions cell is not counted).
pub const DASHBOARD_COLUMNS: usize = 8;

/// One row of the employees table on the benefits dashboard.
///
/// Columns, in order: Id, Last Name, First Name, Dependents, Salary,
/// Gross Pay, Benefits Cost, Net Pay. Money cells are kept as the text the
/// page rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRow {
    /// Employee id cell.
    pub id: String,
    /// Last name cell.
    pub last_name: String,
    /// First name cell.
    pub first_name: String,
    /// Dependents cell.
    pub dependants: u32,
    /// Salary cell.
    pub salary: String,
    /// Gross pay cell.
    pub gross: String,
    /// Benefits cost cell.
    pub benefits_cost: String,
    /// Net pay cell.
    pub net: String,
}

impl DashboardRow {
    /// Builds a row from the text of its cells.
    ///
    /// Surrounding whitespace is trimmed. Cells after the eighth (the edit and
    /// delete actions) are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use benefits_oracle::models::DashboardRow;
    ///
    /// let row = DashboardRow::from_cells(&[
    ///     "3f1c", "TestUser", "Cypress", "2", "52000.00", "2000.00", "76.92", "1923.08", "",
    /// ])
    /// .unwrap();
    /// assert_eq!(row.dependants, 2);
    /// assert_eq!(row.net, "1923.08");
    /// ```
    pub fn from_cells<S: AsRef<str>>(cells: &[S]) -> OracleResult<Self> {
        if cells.len() < DASHBOARD_COLUMNS {
            return Err(OracleError::InvalidDashboardRow {
                message: format!(
                    "expected at least {} cells, got {}",
                    DASHBOARD_COLUMNS,
                    cells.len()
                ),
            });
        }

        let cell = |index: usize| cells[index].as_ref().trim().to_string();
        let dependants_text = cell(3);
        let dependants =
            dependants_text
                .parse::<u32>()
                .map_err(|_| OracleError::InvalidDashboardRow {
                    message: format!("dependents cell '{}' is not a whole number", dependants_text),
                })?;

        Ok(Self {
            id: cell(0),
            last_name: cell(1),
            first_name: cell(2),
            dependants,
            salary: cell(4),
            gross: cell(5),
            benefits_cost: cell(6),
            net: cell(7),
        })
    }

    /// Returns the three money cells of the row.
    pub fn displayed(&self) -> DisplayedPaycheck {
        DisplayedPaycheck {
            gross: self.gross.clone(),
            benefits_cost: self.benefits_cost.clone(),
            net: self.net.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cells_trims_and_maps_columns() {
        let row = DashboardRow::from_cells(&[
            " 42 ", "Smith", "Jane", " 0 ", "52000.00", "2000.00", "38.46", "1961.54",
        ])
        .unwrap();

        assert_eq!(row.id, "42");
        assert_eq!(row.last_name, "Smith");
        assert_eq!(row.first_name, "Jane");
        assert_eq!(row.dependants, 0);
        assert_eq!(row.salary, "52000.00");
        assert_eq!(row.gross, "2000.00");
        assert_eq!(row.benefits_cost, "38.46");
        assert_eq!(row.net, "1961.54");
    }

    #[test]
    fn test_from_cells_rejects_short_rows() {
        let err = DashboardRow::from_cells(&["42", "Smith"]).unwrap_err();

        assert!(err.to_string().contains("expected at least 8 cells, got 2"));
    }

    #[test]
    fn test_from_cells_rejects_non_numeric_dependants() {
        let result = DashboardRow::from_cells(&[
            "42", "Smith", "Jane", "two", "52000.00", "2000.00", "38.46", "1961.54",
        ]);

        assert!(matches!(
            result,
            Err(OracleError::InvalidDashboardRow { .. })
        ));
    }

    #[test]
    fn test_displayed_returns_money_cells() {
        let row = DashboardRow::from_cells(&[
            "42", "Smith", "Jane", "1", "52000.00", "2000.00", "57.69", "1942.31",
        ])
        .unwrap();

        let displayed = row.displayed();

        assert_eq!(displayed.gross, "2000.00");
        assert_eq!(displayed.benefits_cost, "57.69");
        assert_eq!(displayed.net, "1942.31");
    }
}
