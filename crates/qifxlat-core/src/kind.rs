//! Section, record and account kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Every section header a QIF file may contain.
///
/// The two auto-switch control literals are sections without a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    /// `!Account`
    Account,
    /// `!Type:Bank`
    Bank,
    /// `!Type:Cash`
    Cash,
    /// `!Type:CCard`
    CreditCard,
    /// `!Type:Invst`
    Investment,
    /// `!Type:Oth A`
    OtherAsset,
    /// `!Type:Oth L`
    OtherLiability,
    /// `!Type:Cat`
    Category,
    /// `!Type:Memorized`
    Memorized,
    /// `!Type:Tag`
    Tag,
    /// `!Type:Security`
    Security,
    /// `!Type:Prices`
    Prices,
    /// `!Option:AutoSwitch`
    OptionAutoSwitch,
    /// `!Clear:AutoSwitch`
    ClearAutoSwitch,
}

impl SectionKind {
    /// All section kinds, in the order headers are tried.
    pub const ALL: [Self; 14] = [
        Self::Account,
        Self::Bank,
        Self::Cash,
        Self::CreditCard,
        Self::Investment,
        Self::OtherAsset,
        Self::OtherLiability,
        Self::Category,
        Self::Memorized,
        Self::Tag,
        Self::Security,
        Self::Prices,
        Self::OptionAutoSwitch,
        Self::ClearAutoSwitch,
    ];

    /// The header line introducing this section.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Account => "!Account",
            Self::Bank => "!Type:Bank",
            Self::Cash => "!Type:Cash",
            Self::CreditCard => "!Type:CCard",
            Self::Investment => "!Type:Invst",
            Self::OtherAsset => "!Type:Oth A",
            Self::OtherLiability => "!Type:Oth L",
            Self::Category => "!Type:Cat",
            Self::Memorized => "!Type:Memorized",
            Self::Tag => "!Type:Tag",
            Self::Security => "!Type:Security",
            Self::Prices => "!Type:Prices",
            Self::OptionAutoSwitch => "!Option:AutoSwitch",
            Self::ClearAutoSwitch => "!Clear:AutoSwitch",
        }
    }

    /// Look up the section introduced by a header line.
    #[must_use]
    pub fn from_header(line: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.header() == line)
    }

    /// The account type of a transaction-bearing section.
    ///
    /// Returns `None` for sections that do not hold account transactions.
    #[must_use]
    pub const fn account_type(self) -> Option<AccountType> {
        match self {
            Self::Bank => Some(AccountType::Bank),
            Self::Cash => Some(AccountType::Cash),
            Self::CreditCard => Some(AccountType::CreditCard),
            Self::Investment => Some(AccountType::Investment),
            Self::OtherAsset => Some(AccountType::OtherAsset),
            Self::OtherLiability => Some(AccountType::OtherLiability),
            _ => None,
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// The kind of record a decoder produces. Used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// An account declaration.
    Account,
    /// A category.
    Category,
    /// A security.
    Security,
    /// A tag.
    Tag,
    /// A bank, cash, credit card, asset, liability or investment transaction.
    Transaction,
    /// A memorized transaction.
    Memorized,
    /// A price entry.
    Price,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Account => "account",
            Self::Category => "category",
            Self::Security => "security",
            Self::Tag => "tag",
            Self::Transaction => "transaction",
            Self::Memorized => "memorized",
            Self::Price => "price",
        })
    }
}

/// An account type string outside the closed set of Quicken types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid account type {0:?}")]
pub struct UnknownAccountType(pub String);

/// The closed set of Quicken account types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    /// `Bank`
    Bank,
    /// `Cash`
    Cash,
    /// `CCard`
    CreditCard,
    /// `Invst`
    Investment,
    /// `Oth A`
    OtherAsset,
    /// `Oth L`
    OtherLiability,
    /// `Port`
    Portfolio,
    /// `401(k)/403(b)`
    Retirement,
}

impl AccountType {
    /// The spelling Quicken uses in `T` fields and `!Type:` headers.
    #[must_use]
    pub const fn as_qif(self) -> &'static str {
        match self {
            Self::Bank => "Bank",
            Self::Cash => "Cash",
            Self::CreditCard => "CCard",
            Self::Investment => "Invst",
            Self::OtherAsset => "Oth A",
            Self::OtherLiability => "Oth L",
            Self::Portfolio => "Port",
            Self::Retirement => "401(k)/403(b)",
        }
    }

    /// Whether a lone opening-balance posting keeps its QIF sign.
    #[must_use]
    pub const fn keeps_own_sign(self) -> bool {
        matches!(
            self,
            Self::Bank | Self::Cash | Self::CreditCard | Self::OtherAsset | Self::OtherLiability
        )
    }
}

impl FromStr for AccountType {
    type Err = UnknownAccountType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bank" => Ok(Self::Bank),
            "Cash" => Ok(Self::Cash),
            "CCard" => Ok(Self::CreditCard),
            "Invst" => Ok(Self::Investment),
            "Oth A" => Ok(Self::OtherAsset),
            "Oth L" => Ok(Self::OtherLiability),
            "Port" => Ok(Self::Portfolio),
            "401(k)/403(b)" => Ok(Self::Retirement),
            _ => Err(UnknownAccountType(s.to_string())),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_qif())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_header_round_trip() {
        for kind in SectionKind::ALL {
            assert_eq!(SectionKind::from_header(kind.header()), Some(kind));
        }
    }

    #[test]
    fn test_section_header_is_exact() {
        assert_eq!(SectionKind::from_header("!Type:bank"), None);
        assert_eq!(SectionKind::from_header("!Type:Bank2"), None);
        assert_eq!(SectionKind::from_header("!Type:Invoice"), None);
    }

    #[test]
    fn test_account_type_of_section() {
        assert_eq!(
            SectionKind::OtherLiability.account_type(),
            Some(AccountType::OtherLiability)
        );
        assert_eq!(SectionKind::Memorized.account_type(), None);
        assert_eq!(SectionKind::Prices.account_type(), None);
    }

    #[test]
    fn test_account_type_from_str() {
        assert_eq!("CCard".parse::<AccountType>(), Ok(AccountType::CreditCard));
        assert_eq!("401(k)/403(b)".parse::<AccountType>(), Ok(AccountType::Retirement));
        assert_eq!(
            "Mutual".parse::<AccountType>(),
            Err(UnknownAccountType("Mutual".to_string()))
        );
    }

    #[test]
    fn test_keeps_own_sign() {
        assert!(AccountType::Bank.keeps_own_sign());
        assert!(AccountType::OtherLiability.keeps_own_sign());
        assert!(!AccountType::Investment.keeps_own_sign());
        assert!(!AccountType::Portfolio.keeps_own_sign());
    }
}
