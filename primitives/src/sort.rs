use parse_display::{Display, FromStr};
use serde::{Deserialize, Serialize};

/// The fields a list view can be sorted by.
#[derive(Debug, Display, FromStr, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[display(style = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// Case-insensitive lexicographic order of the view's name field.
    Name,
    /// Chronological order of the view's detected date field.
    Date,
}

impl SortField {
    /// The direction a field starts with when it gets activated.
    pub fn default_direction(&self) -> SortDirection {
        match self {
            Self::Name => SortDirection::Asc,
            Self::Date => SortDirection::Desc,
        }
    }
}

#[derive(Debug, Display, FromStr, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[display(style = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// The single active sort of a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    /// Activates `field` with its default direction.
    pub fn new(field: SortField) -> Self {
        Self {
            field,
            direction: field.default_direction(),
        }
    }

    /// Clicking the active field flips the direction,
    /// clicking another one activates it with its default direction.
    pub fn toggle(self, field: SortField) -> Self {
        if self.field == field {
            Self {
                field,
                direction: self.direction.flip(),
            }
        } else {
            Self::new(field)
        }
    }
}

/// Newest first.
impl Default for SortState {
    fn default() -> Self {
        Self::new(SortField::Date)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn toggling_sort_state() {
        let by_date = SortState::default();
        assert_eq!(SortField::Date, by_date.field);
        assert_eq!(SortDirection::Desc, by_date.direction);

        let flipped = by_date.toggle(SortField::Date);
        assert_eq!(SortDirection::Asc, flipped.direction);
        assert_eq!(by_date, flipped.toggle(SortField::Date));

        // a new field always starts from its own default, regardless of the previous direction
        let by_name = flipped.toggle(SortField::Name);
        assert_eq!(
            SortState {
                field: SortField::Name,
                direction: SortDirection::Asc
            },
            by_name
        );
        assert_eq!(SortState::new(SortField::Date), by_name.toggle(SortField::Date));
    }

    #[test]
    fn parses_sort_field() {
        assert_eq!(Ok(SortField::Name), "name".parse());
        assert_eq!(Ok(SortDirection::Desc), "desc".parse());
        assert!("Name".parse::<SortField>().is_err());
    }
}
