use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Values a parameter's `in` field can carry, across both OpenAPI dialects.
///
/// OpenAPI 2.x additionally allows `body` and `formData`; in 3.x those are no
/// longer parameter locations, so parameters using them do not survive the
/// parameter list rewrite.
#[derive(PartialEq, Debug)]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Body,
    FormData,
}

impl ParameterLocation {
    /// Whether a parameter in this location is still a parameter in 3.x.
    pub(crate) fn is_backward_compatible(&self) -> bool {
        matches!(
            self,
            ParameterLocation::Query | ParameterLocation::Header | ParameterLocation::Path
        )
    }
}

impl Display for ParameterLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let str = String::from(match self {
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Path => "path",
            ParameterLocation::Body => "body",
            ParameterLocation::FormData => "formData",
        });
        write!(f, "{}", str)
    }
}

impl FromStr for ParameterLocation {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "query" => Ok(ParameterLocation::Query),
            "header" => Ok(ParameterLocation::Header),
            "path" => Ok(ParameterLocation::Path),
            "body" => Ok(ParameterLocation::Body),
            "formData" => Ok(ParameterLocation::FormData),
            _ => Err(UnknownValueError::location(s)),
        }
    }
}

/// Values the 2.x `collectionFormat` parameter field can carry.
#[derive(PartialEq, Debug)]
pub enum CollectionFormat {
    Csv,
    Ssv,
    Tsv,
    Pipes,
    Multi,
}

impl Display for CollectionFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let str = String::from(match self {
            CollectionFormat::Csv => "csv",
            CollectionFormat::Ssv => "ssv",
            CollectionFormat::Tsv => "tsv",
            CollectionFormat::Pipes => "pipes",
            CollectionFormat::Multi => "multi",
        });
        write!(f, "{}", str)
    }
}

impl FromStr for CollectionFormat {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(CollectionFormat::Csv),
            "ssv" => Ok(CollectionFormat::Ssv),
            "tsv" => Ok(CollectionFormat::Tsv),
            "pipes" => Ok(CollectionFormat::Pipes),
            "multi" => Ok(CollectionFormat::Multi),
            _ => Err(UnknownValueError::collection_format(s)),
        }
    }
}

/// The 3.x serialization attributes replacing a 2.x `collectionFormat`.
#[derive(PartialEq, Debug)]
pub struct ParameterStyle {
    pub name: &'static str,
    pub explode: Option<bool>,
}

impl CollectionFormat {
    /// Translates this collection format into the 3.x `style`/`explode` pair
    /// for a parameter in the given location.
    ///
    /// # Parameters
    /// - `location`: The location of the parameter carrying the format
    ///
    /// # Returns
    /// The matching `ParameterStyle`, or `None` when 3.x defines no
    /// equivalent for the combination. `tsv` in particular has no 3.x
    /// counterpart and is always dropped.
    pub fn style(&self, location: &ParameterLocation) -> Option<ParameterStyle> {
        match (location, self) {
            (ParameterLocation::Path | ParameterLocation::Header, CollectionFormat::Csv) => {
                Some(ParameterStyle {
                    name: "simple",
                    explode: None,
                })
            }
            (ParameterLocation::Query, CollectionFormat::Csv) => Some(ParameterStyle {
                name: "form",
                explode: Some(false),
            }),
            (ParameterLocation::Query, CollectionFormat::Multi) => Some(ParameterStyle {
                name: "form",
                explode: Some(true),
            }),
            (ParameterLocation::Query, CollectionFormat::Ssv) => Some(ParameterStyle {
                name: "spaceDelimited",
                explode: None,
            }),
            (ParameterLocation::Query, CollectionFormat::Pipes) => Some(ParameterStyle {
                name: "pipeDelimited",
                explode: None,
            }),
            (_, _) => None,
        }
    }
}

/// A string that is not one of the enumerated values for its field.
///
/// The converter never surfaces this error: parameters with an unknown
/// location are filtered out, and unknown collection formats produce no
/// `style`/`explode` fields.
#[derive(Debug)]
pub enum UnknownValueError {
    Location(String),
    CollectionFormat(String),
}

impl UnknownValueError {
    pub(crate) fn location<T>(value: &T) -> Self
    where
        T: ToString + ?Sized,
    {
        UnknownValueError::Location(value.to_string())
    }

    pub(crate) fn collection_format<T>(value: &T) -> Self
    where
        T: ToString + ?Sized,
    {
        UnknownValueError::CollectionFormat(value.to_string())
    }
}

impl Display for UnknownValueError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UnknownValueError::Location(value) => {
                write!(f, "Unknown parameter location: {}", value)
            }
            UnknownValueError::CollectionFormat(value) => {
                write!(f, "Unknown collection format: {}", value)
            }
        }
    }
}

impl std::error::Error for UnknownValueError {}

#[cfg(test)]
mod test {
    use crate::types::{CollectionFormat, ParameterLocation, ParameterStyle, UnknownValueError};
    use std::str::FromStr;

    #[test]
    fn test_location_round_trip() {
        for raw in ["query", "header", "path", "body", "formData"] {
            let location = ParameterLocation::from_str(raw).unwrap();
            assert_eq!(location.to_string(), raw);
        }
    }

    #[test]
    fn test_location_unknown() {
        let result = ParameterLocation::from_str("cookie");
        if let Err(UnknownValueError::Location(value)) = result {
            assert_eq!(value, "cookie");
        } else {
            panic!("Expected UnknownValueError::Location");
        }
    }

    #[test]
    fn test_backward_compatible_locations() {
        assert!(ParameterLocation::Query.is_backward_compatible());
        assert!(ParameterLocation::Header.is_backward_compatible());
        assert!(ParameterLocation::Path.is_backward_compatible());
        assert!(!ParameterLocation::Body.is_backward_compatible());
        assert!(!ParameterLocation::FormData.is_backward_compatible());
    }

    #[test]
    fn test_style_for_query_formats() {
        assert_eq!(
            CollectionFormat::Csv.style(&ParameterLocation::Query),
            Some(ParameterStyle {
                name: "form",
                explode: Some(false)
            })
        );
        assert_eq!(
            CollectionFormat::Multi.style(&ParameterLocation::Query),
            Some(ParameterStyle {
                name: "form",
                explode: Some(true)
            })
        );
        assert_eq!(
            CollectionFormat::Ssv.style(&ParameterLocation::Query),
            Some(ParameterStyle {
                name: "spaceDelimited",
                explode: None
            })
        );
        assert_eq!(
            CollectionFormat::Pipes.style(&ParameterLocation::Query),
            Some(ParameterStyle {
                name: "pipeDelimited",
                explode: None
            })
        );
        assert_eq!(CollectionFormat::Tsv.style(&ParameterLocation::Query), None);
    }

    #[test]
    fn test_style_for_path_and_header_formats() {
        assert_eq!(
            CollectionFormat::Csv.style(&ParameterLocation::Path),
            Some(ParameterStyle {
                name: "simple",
                explode: None
            })
        );
        assert_eq!(
            CollectionFormat::Csv.style(&ParameterLocation::Header),
            Some(ParameterStyle {
                name: "simple",
                explode: None
            })
        );
        // Only 'csv' has a defined translation outside the query location.
        assert_eq!(CollectionFormat::Multi.style(&ParameterLocation::Path), None);
        assert_eq!(CollectionFormat::Ssv.style(&ParameterLocation::Header), None);
    }
}
