use super::model::{Record, Table};

// ---------------------------------------------------------------------------
// Selection: rows matching a company query
// ---------------------------------------------------------------------------

/// Rows of a [`Table`] whose company equals the query.
///
/// An empty selection is a normal outcome ("company not found"), not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// The query as matched (surrounding whitespace removed).
    pub query: String,
    /// Indices into `Table::records`, ascending.
    pub indices: Vec<usize>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Matching records in row order.
    pub fn records<'t>(&'t self, table: &'t Table) -> impl Iterator<Item = &'t Record> + 't {
        self.indices.iter().filter_map(|&i| table.records.get(i))
    }

    /// The first match; what the headline Revenue / Profit figures show.
    pub fn first<'t>(&self, table: &'t Table) -> Option<&'t Record> {
        self.indices.first().and_then(|&i| table.records.get(i))
    }
}

/// Return every row whose company equals `company_name`.
///
/// The query is trimmed; the comparison itself is exact and case-sensitive.
pub fn find(table: &Table, company_name: &str) -> Selection {
    let query = company_name.trim();
    let indices = table
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| rec.company == query)
        .map(|(i, _)| i)
        .collect();

    Selection {
        query: query.to_string(),
        indices,
    }
}
