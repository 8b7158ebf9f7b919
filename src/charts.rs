//! Visualization request handling.
//!
//! Classifies a dataset's columns into numeric and categorical sets, then
//! validates a [`ChartRequest`] against them and resolves it into a
//! [`ChartDescriptor`] that borrows the dataset's columns. Every call is a
//! pure function of (dataset, request).

use crate::types::{ChartKind, ChartRequest, Column, ColumnKind, Dataset, Role};
use serde::Serialize;
use thiserror::Error;

/// Column names split by type, each list in dataset column order.
///
/// The two lists are disjoint and together name every column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ColumnClassification {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

impl ColumnClassification {
    pub fn kind_of(&self, column: &str) -> Option<ColumnKind> {
        if self.numeric.iter().any(|c| c == column) {
            Some(ColumnKind::Numeric)
        } else if self.categorical.iter().any(|c| c == column) {
            Some(ColumnKind::Categorical)
        } else {
            None
        }
    }

    /// Names usable for a role that needs `kind`
    pub fn columns_of(&self, kind: ColumnKind) -> &[String] {
        match kind {
            ColumnKind::Numeric => &self.numeric,
            ColumnKind::Categorical => &self.categorical,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.numeric.is_empty() && self.categorical.is_empty()
    }
}

/// Partition column names by their load-time type
pub fn classify_columns(dataset: &Dataset) -> ColumnClassification {
    let mut classification = ColumnClassification::default();
    for column in dataset.columns() {
        match column {
            Column::Numeric(c) => classification.numeric.push(c.name.clone()),
            Column::Categorical(c) => classification.categorical.push(c.name.clone()),
        }
    }
    classification
}

/// A role a chart kind accepts and the column type it needs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RoleRequirement {
    pub role: Role,
    pub column_kind: ColumnKind,
    pub required: bool,
}

const fn needs(role: Role, column_kind: ColumnKind) -> RoleRequirement {
    RoleRequirement {
        role,
        column_kind,
        required: true,
    }
}

const fn allows(role: Role, column_kind: ColumnKind) -> RoleRequirement {
    RoleRequirement {
        role,
        column_kind,
        required: false,
    }
}

const HISTOGRAM_ROLES: [RoleRequirement; 2] = [
    needs(Role::X, ColumnKind::Numeric),
    allows(Role::Color, ColumnKind::Categorical),
];

const CATEGORY_VALUE_ROLES: [RoleRequirement; 2] = [
    needs(Role::X, ColumnKind::Categorical),
    needs(Role::Y, ColumnKind::Numeric),
];

const SCATTER_ROLES: [RoleRequirement; 3] = [
    needs(Role::X, ColumnKind::Numeric),
    needs(Role::Y, ColumnKind::Numeric),
    allows(Role::Color, ColumnKind::Categorical),
];

/// Roles accepted by a chart kind, in validation order (X, Y, Color)
pub fn role_requirements(kind: ChartKind) -> &'static [RoleRequirement] {
    match kind {
        ChartKind::Histogram => &HISTOGRAM_ROLES,
        ChartKind::BoxPlot | ChartKind::BarPlot => &CATEGORY_VALUE_ROLES,
        ChartKind::Scatterplot => &SCATTER_ROLES,
    }
}

/// Why a chart request could not be built
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    /// The referenced column does not exist in the dataset
    #[error("column '{column}' selected for {role} does not exist in the dataset")]
    InvalidColumn { role: Role, column: String },

    /// The referenced column exists but has the wrong type for its role
    #[error("{kind} needs a {expected} column for {role}, but '{column}' is {found}")]
    TypeMismatch {
        kind: ChartKind,
        role: Role,
        column: String,
        expected: ColumnKind,
        found: ColumnKind,
    },

    #[error("{kind} needs a column for {role}")]
    MissingRole { kind: ChartKind, role: Role },

    #[error("{kind} has no {role} role")]
    UnexpectedRole { kind: ChartKind, role: Role },

    #[error("{kind} is not available on this dashboard")]
    UnsupportedKind { kind: ChartKind },
}

/// A column bound to a role, borrowed from the dataset
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Encoding<'a> {
    pub role: Role,
    pub column: &'a Column,
}

/// A validated chart, ready for a renderer
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartDescriptor<'a> {
    pub kind: ChartKind,
    pub title: String,
    /// Bound columns in X, Y, Color order
    pub encodings: Vec<Encoding<'a>>,
    /// Column that splits the data into colored groups
    pub grouping: Option<&'a str>,
}

impl<'a> ChartDescriptor<'a> {
    pub fn column(&self, role: Role) -> Option<&'a Column> {
        self.encodings
            .iter()
            .find(|e| e.role == role)
            .map(|e| e.column)
    }

    pub fn grouping_column(&self) -> Option<&'a Column> {
        let name = self.grouping?;
        self.encodings
            .iter()
            .map(|e| e.column)
            .find(|c| c.name() == name)
    }
}

/// Builds charts for a fixed set of supported kinds
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartHandler {
    supported: Vec<ChartKind>,
}

impl Default for ChartHandler {
    fn default() -> Self {
        Self::all()
    }
}

impl ChartHandler {
    pub fn new(kinds: impl IntoIterator<Item = ChartKind>) -> Self {
        let mut supported: Vec<ChartKind> = kinds.into_iter().collect();
        supported.sort();
        supported.dedup();
        Self { supported }
    }

    /// A handler that accepts every chart kind
    pub fn all() -> Self {
        Self::new(ChartKind::all().iter().copied())
    }

    pub fn supports(&self, kind: ChartKind) -> bool {
        self.supported.contains(&kind)
    }

    pub fn supported_kinds(&self) -> &[ChartKind] {
        &self.supported
    }

    /// Validate a request and resolve it against the dataset
    pub fn build_chart<'a>(
        &self,
        dataset: &'a Dataset,
        request: &ChartRequest,
    ) -> Result<ChartDescriptor<'a>, ChartError> {
        let kind = request.kind;
        if !self.supports(kind) {
            return Err(ChartError::UnsupportedKind { kind });
        }

        let requirements = role_requirements(kind);
        if let Some(role) = request
            .fields
            .keys()
            .find(|role| !requirements.iter().any(|r| r.role == **role))
        {
            return Err(ChartError::UnexpectedRole { kind, role: *role });
        }
        if let Some(missing) = requirements
            .iter()
            .find(|r| r.required && request.field(r.role).is_none())
        {
            return Err(ChartError::MissingRole {
                kind,
                role: missing.role,
            });
        }

        let mut encodings = Vec::with_capacity(requirements.len());
        for requirement in requirements {
            let Some(name) = request.field(requirement.role) else {
                continue;
            };
            let column = dataset
                .column(name)
                .ok_or_else(|| ChartError::InvalidColumn {
                    role: requirement.role,
                    column: name.to_string(),
                })?;
            if column.kind() != requirement.column_kind {
                return Err(ChartError::TypeMismatch {
                    kind,
                    role: requirement.role,
                    column: name.to_string(),
                    expected: requirement.column_kind,
                    found: column.kind(),
                });
            }
            encodings.push(Encoding {
                role: requirement.role,
                column,
            });
        }

        let descriptor = ChartDescriptor {
            kind,
            title: chart_title(kind, request),
            grouping: grouping_field(&encodings),
            encodings,
        };

        tracing::debug!(kind = %kind, title = %descriptor.title, "Built chart");
        Ok(descriptor)
    }

    /// Build several charts from one interaction; each succeeds or fails alone
    pub fn build_charts<'a>(
        &self,
        dataset: &'a Dataset,
        requests: &[ChartRequest],
    ) -> Vec<Result<ChartDescriptor<'a>, ChartError>> {
        requests
            .iter()
            .map(|request| self.build_chart(dataset, request))
            .collect()
    }
}

/// Validate a request with every chart kind available
pub fn build_chart<'a>(
    dataset: &'a Dataset,
    request: &ChartRequest,
) -> Result<ChartDescriptor<'a>, ChartError> {
    ChartHandler::all().build_chart(dataset, request)
}

/// Color column if bound, otherwise the categorical axis
fn grouping_field<'a>(encodings: &[Encoding<'a>]) -> Option<&'a str> {
    let pick = |role: Role| {
        encodings
            .iter()
            .find(|e| e.role == role && e.column.kind() == ColumnKind::Categorical)
            .map(|e| e.column.name())
    };
    pick(Role::Color).or_else(|| pick(Role::X))
}

fn chart_title(kind: ChartKind, request: &ChartRequest) -> String {
    let x = request.field(Role::X).unwrap_or_default();
    let y = request.field(Role::Y).unwrap_or_default();
    match kind {
        ChartKind::Histogram => format!("Histogram of {}", x),
        ChartKind::BoxPlot => format!("Box Plot: {} vs {}", y, x),
        ChartKind::BarPlot => format!("Bar Plot: {} by {}", y, x),
        ChartKind::Scatterplot => format!("{} vs. {}", display_name(x), display_name(y)),
    }
}

/// Title-case each word and turn underscores into spaces
///
/// `"GDP_per_capita"` becomes `"Gdp Per Capita"`.
pub fn display_name(column: &str) -> String {
    let mut out = String::with_capacity(column.len());
    let mut in_word = false;
    for ch in column.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(if ch == '_' { ' ' } else { ch });
            in_word = false;
        }
    }
    out
}
