use std::collections::HashMap;

use crate::errors::{MappingError, Result};

/// Identifies the source column of one slot, either by header name or by position.
///
/// Which one is used is decided per parse: with a header row the identifier is looked up in the
/// header, without one the explicit index wins, and the identifier is read as a number otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub column_identifier: String,
    pub column_index: Option<usize>,
}

impl ColumnMapping {
    pub fn new<T: Into<String>>(column_identifier: T, column_index: Option<usize>) -> Self {
        Self {
            column_identifier: column_identifier.into(),
            column_index,
        }
    }

    pub fn named<T: Into<String>>(column_identifier: T) -> Self {
        Self::new(column_identifier, None)
    }

    pub fn indexed(column_index: usize) -> Self {
        Self::new(column_index.to_string(), Some(column_index))
    }
}

/// Header name -> zero based column index, built from the header row of one parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMap {
    case_insensitive: bool,
    names: Vec<String>,
    idxs: HashMap<String, usize>,
}

impl HeaderMap {
    /// On duplicate header names the first column wins.
    pub fn from_fields(fields: &[String], case_insensitive: bool) -> Self {
        let mut idxs = HashMap::with_capacity(fields.len());
        for (i, name) in fields.iter().enumerate() {
            idxs.entry(Self::key(name, case_insensitive)).or_insert(i);
        }
        Self {
            case_insensitive,
            names: fields.to_vec(),
            idxs,
        }
    }

    fn key(name: &str, case_insensitive: bool) -> String {
        if case_insensitive {
            name.to_lowercase()
        } else {
            name.to_string()
        }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.idxs
            .get(&Self::key(name, self.case_insensitive))
            .copied()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Computes the field index a mapping reads from. A present header map is authoritative, the
/// mapping's explicit index is not consulted then.
pub fn resolve_index(mapping: &ColumnMapping, header_map: Option<&HeaderMap>) -> Result<usize> {
    match header_map {
        Some(hm) => hm.get(&mapping.column_identifier).ok_or_else(|| {
            MappingError::ColumnNotFound {
                identifier: mapping.column_identifier.clone(),
                available: hm.names().to_vec(),
            }
            .into()
        }),
        None => match mapping.column_index {
            Some(idx) => Ok(idx),
            None => mapping
                .column_identifier
                .trim()
                .parse::<usize>()
                .map_err(|_| {
                    MappingError::ColumnMappingInvalid {
                        identifier: mapping.column_identifier.clone(),
                        msg: String::from("must be numeric when no header row"),
                    }
                    .into()
                }),
        },
    }
}

/// Checks a resolved index against the fields actually present on the line. With
/// `enforce_column_count`, lines carrying more fields than there are mappings are rejected too.
pub fn validate_index(
    index: usize,
    field_count: usize,
    mapping_count: usize,
    enforce_column_count: bool,
    line_number: usize,
) -> Result<()> {
    if index >= field_count {
        return Err(MappingError::ColumnIndexOutOfRange {
            requested_index: index,
            available_columns: field_count,
            line_number,
        }
        .into());
    }
    if enforce_column_count && field_count > mapping_count {
        return Err(MappingError::MappingCountMismatch {
            field_count,
            mapping_count,
            line_number,
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorKind, PattiError};

    fn header(names: &[&str], case_insensitive: bool) -> HeaderMap {
        let fields: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        HeaderMap::from_fields(&fields, case_insensitive)
    }

    #[test]
    fn header_lookup_case_insensitive() {
        let hm = header(&["Name", "Age"], true);
        assert_eq!(Ok(1), resolve_index(&ColumnMapping::named("age"), Some(&hm)));
        assert_eq!(Ok(0), resolve_index(&ColumnMapping::named("NAME"), Some(&hm)));
    }

    #[test]
    fn header_lookup_case_sensitive() {
        let hm = header(&["Name", "Age"], false);
        assert_eq!(Ok(1), resolve_index(&ColumnMapping::named("Age"), Some(&hm)));
        assert_eq!(
            Err(PattiError::Mapping(MappingError::ColumnNotFound {
                identifier: "age".into(),
                available: vec!["Name".into(), "Age".into()],
            })),
            resolve_index(&ColumnMapping::named("age"), Some(&hm))
        );
    }

    #[test]
    fn header_wins_over_index() {
        let hm = header(&["a", "b", "c"], true);
        let mapping = ColumnMapping::new("c", Some(0));
        assert_eq!(Ok(2), resolve_index(&mapping, Some(&hm)));

        let mapping = ColumnMapping::new("missing", Some(0));
        assert_eq!(
            ErrorKind::ColumnNotFound,
            resolve_index(&mapping, Some(&hm)).unwrap_err().kind()
        );
    }

    #[test]
    fn duplicate_header_first_wins() {
        let hm = header(&["x", "y", "X"], true);
        assert_eq!(Some(0), hm.get("x"));
        assert_eq!(3, hm.len());
    }

    #[test]
    fn index_mode() {
        assert_eq!(Ok(3), resolve_index(&ColumnMapping::indexed(3), None));
        assert_eq!(Ok(2), resolve_index(&ColumnMapping::named("2"), None));
        assert_eq!(
            Ok(4),
            resolve_index(&ColumnMapping::new("Name", Some(4)), None)
        );
    }

    #[test]
    fn index_mode_non_numeric() {
        let err = resolve_index(&ColumnMapping::named("Name"), None).unwrap_err();
        assert_eq!(ErrorKind::ColumnMappingInvalid, err.kind());
        assert!(err.to_string().contains("must be numeric when no header row"));

        let err = resolve_index(&ColumnMapping::named("-1"), None).unwrap_err();
        assert_eq!(ErrorKind::ColumnMappingInvalid, err.kind());
    }

    #[test]
    fn validate_out_of_range() {
        assert_eq!(
            Err(PattiError::Mapping(MappingError::ColumnIndexOutOfRange {
                requested_index: 5,
                available_columns: 3,
                line_number: 7,
            })),
            validate_index(5, 3, 3, false, 7)
        );
        assert_eq!(Ok(()), validate_index(2, 3, 3, true, 7));
    }

    #[test]
    fn validate_mapping_count_mismatch() {
        assert_eq!(
            Err(PattiError::Mapping(MappingError::MappingCountMismatch {
                field_count: 4,
                mapping_count: 2,
                line_number: 1,
            })),
            validate_index(0, 4, 2, true, 1)
        );
        // only enforced on request
        assert_eq!(Ok(()), validate_index(0, 4, 2, false, 1));
    }
}
