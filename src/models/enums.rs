use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parse failure for a closed string vocabulary, carrying the offending value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid value for {field}: '{value}'")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The wire string of each variant doubles as its serde name.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Gender {
    Male => "male",
    Female => "female",
    Others => "others",
});

str_enum!(Occupation {
    Retired => "retired",
    Freelancer => "freelancer",
    Student => "student",
    GovernmentJob => "government_job",
    BusinessOwner => "business_owner",
    Unemployed => "unemployed",
    PrivateJob => "private_job",
});

// Verdict strings are capitalized on the wire; the deployed contract has
// always served them that way.
str_enum!(BmiVerdict {
    Underweight => "Underweight",
    Normal => "Normal",
    Overweight => "Overweight",
    Obese => "Obese",
});

str_enum!(AgeGroup {
    Young => "young",
    Adult => "adult",
    MiddleAged => "middle_aged",
    Senior => "senior",
});

str_enum!(LifestyleRisk {
    Low => "low",
    Medium => "medium",
    High => "high",
});

str_enum!(SortField {
    Height => "height",
    Weight => "weight",
    Bmi => "bmi",
});

str_enum!(SortOrder {
    Asc => "asc",
    Desc => "desc",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn gender_round_trip() {
        for (variant, s) in [
            (Gender::Male, "male"),
            (Gender::Female, "female"),
            (Gender::Others, "others"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Gender::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn occupation_round_trip() {
        for (variant, s) in [
            (Occupation::Retired, "retired"),
            (Occupation::Freelancer, "freelancer"),
            (Occupation::Student, "student"),
            (Occupation::GovernmentJob, "government_job"),
            (Occupation::BusinessOwner, "business_owner"),
            (Occupation::Unemployed, "unemployed"),
            (Occupation::PrivateJob, "private_job"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Occupation::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn bmi_verdict_round_trip() {
        for (variant, s) in [
            (BmiVerdict::Underweight, "Underweight"),
            (BmiVerdict::Normal, "Normal"),
            (BmiVerdict::Overweight, "Overweight"),
            (BmiVerdict::Obese, "Obese"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(BmiVerdict::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn sort_vocabulary_round_trip() {
        for (variant, s) in [
            (SortField::Height, "height"),
            (SortField::Weight, "weight"),
            (SortField::Bmi, "bmi"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(SortField::from_str(s).unwrap(), variant);
        }
        assert_eq!(SortOrder::from_str("asc").unwrap(), SortOrder::Asc);
        assert_eq!(SortOrder::from_str("desc").unwrap(), SortOrder::Desc);
    }

    #[test]
    fn all_lists_every_variant() {
        assert_eq!(Gender::ALL.len(), 3);
        assert_eq!(Occupation::ALL.len(), 7);
        assert_eq!(AgeGroup::ALL.len(), 4);
        assert_eq!(LifestyleRisk::ALL.len(), 3);
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(Gender::from_str("robot").is_err());
        assert!(Occupation::from_str("astronaut").is_err());
        assert!(SortField::from_str("age").is_err());
        assert!(SortOrder::from_str("").is_err());
    }

    #[test]
    fn serde_uses_wire_strings() {
        assert_eq!(
            serde_json::to_value(Gender::Others).unwrap(),
            serde_json::json!("others")
        );
        assert_eq!(
            serde_json::to_value(Occupation::GovernmentJob).unwrap(),
            serde_json::json!("government_job")
        );
        assert_eq!(
            serde_json::to_value(BmiVerdict::Obese).unwrap(),
            serde_json::json!("Obese")
        );
        let parsed: Occupation = serde_json::from_str("\"private_job\"").unwrap();
        assert_eq!(parsed, Occupation::PrivateJob);
        assert!(serde_json::from_str::<Occupation>("\"pilot\"").is_err());
    }
}
