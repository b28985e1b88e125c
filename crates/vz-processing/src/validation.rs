//! Checks run before the preview is shown

use thiserror::Error;

use crate::catalog::OperationId;
use crate::config::OperationConfig;
use crate::Configs;

/// The first problem found in the selection. The display text is the
/// message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select at least one operation")]
    NoOperations,

    #[error("Please enter a name for the new calculated column")]
    MissingCalculatedColumnName,

    #[error("Please select at least one source column for the calculation")]
    MissingSourceColumns,

    #[error("Please enter a name for the percentage change column")]
    MissingPercentageColumnName,

    #[error("Please select a base column for percentage calculation")]
    MissingBaseColumn,

    #[error("Please select a compare column for percentage calculation")]
    MissingCompareColumn,

    #[error("Please select at least one column for \"{}\"", .0.name())]
    MissingColumns(OperationId),
}

impl ValidationError {
    /// Operation the error is about, if any
    pub fn operation(&self) -> Option<OperationId> {
        match self {
            ValidationError::NoOperations => None,
            ValidationError::MissingCalculatedColumnName | ValidationError::MissingSourceColumns => {
                Some(OperationId::AddColumn)
            }
            ValidationError::MissingPercentageColumnName
            | ValidationError::MissingBaseColumn
            | ValidationError::MissingCompareColumn => Some(OperationId::PercentageChange),
            ValidationError::MissingColumns(op) => Some(*op),
        }
    }
}

/// Check the selection in order and stop at the first failing operation
pub fn validate(selected: &[OperationId], configs: &Configs) -> Result<(), ValidationError> {
    if selected.is_empty() {
        return Err(ValidationError::NoOperations);
    }

    let empty = OperationConfig::default();
    for op in selected {
        let config = configs.get(op).unwrap_or(&empty);
        validate_operation(*op, config)?;
    }
    Ok(())
}

fn validate_operation(op: OperationId, config: &OperationConfig) -> Result<(), ValidationError> {
    match op {
        OperationId::AddColumn => {
            if config.column_name().is_none() {
                return Err(ValidationError::MissingCalculatedColumnName);
            }
            if config.columns.is_empty() {
                return Err(ValidationError::MissingSourceColumns);
            }
        }
        OperationId::PercentageChange => {
            if config.column_name().is_none() {
                return Err(ValidationError::MissingPercentageColumnName);
            }
            if config.base().is_none() {
                return Err(ValidationError::MissingBaseColumn);
            }
            if config.compare().is_none() {
                return Err(ValidationError::MissingCompareColumn);
            }
        }
        _ if op.entry().needs_columns && config.columns.is_empty() => {
            return Err(ValidationError::MissingColumns(op));
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigField;

    fn configs_for(ops: &[OperationId]) -> Configs {
        ops.iter().map(|op| (*op, OperationConfig::initial(*op))).collect()
    }

    #[test]
    fn test_nothing_selected() {
        assert_eq!(validate(&[], &Configs::new()), Err(ValidationError::NoOperations));
    }

    #[test]
    fn test_remove_duplicates_needs_columns() {
        let ops = [OperationId::RemoveDuplicates];
        let err = validate(&ops, &configs_for(&ops)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please select at least one column for \"Remove Duplicate Rows\""
        );
    }

    #[test]
    fn test_add_column_rules() {
        let ops = [OperationId::AddColumn];
        let mut configs = configs_for(&ops);
        assert_eq!(
            validate(&ops, &configs),
            Err(ValidationError::MissingCalculatedColumnName)
        );

        let config = configs.get_mut(&OperationId::AddColumn).unwrap();
        config.apply(ConfigField::NewColumnName("Margin".to_string()));
        assert_eq!(validate(&ops, &configs), Err(ValidationError::MissingSourceColumns));

        configs.get_mut(&OperationId::AddColumn).unwrap().columns = vec!["Profit".to_string()];
        assert!(validate(&ops, &configs).is_ok());
    }

    #[test]
    fn test_percentage_change_rules() {
        let ops = [OperationId::PercentageChange];
        let mut configs = configs_for(&ops);
        let config = configs.get_mut(&OperationId::PercentageChange).unwrap();
        config.apply(ConfigField::NewColumnName("Growth".to_string()));
        config.apply(ConfigField::BaseColumn("Cost".to_string()));
        assert_eq!(validate(&ops, &configs), Err(ValidationError::MissingCompareColumn));

        // Columns are not required once the named fields are set
        let config = configs.get_mut(&OperationId::PercentageChange).unwrap();
        config.apply(ConfigField::CompareColumn("Sales".to_string()));
        assert!(validate(&ops, &configs).is_ok());
    }

    #[test]
    fn test_first_failure_wins() {
        let ops = [OperationId::DataQuality, OperationId::SortData, OperationId::AddColumn];
        let err = validate(&ops, &configs_for(&ops)).unwrap_err();
        assert_eq!(err, ValidationError::MissingColumns(OperationId::SortData));
        assert_eq!(err.operation(), Some(OperationId::SortData));
    }
}
