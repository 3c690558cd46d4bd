use serde::{Deserialize, Serialize};

use crate::error::KeepaError;

/// How a history series is to be read.
///
/// Only `is_with_shipping` (record layout) and `is_price` matter to the
/// analyzer; the other flags are carried for calling code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesKind {
    pub index: usize,
    pub is_price: bool,
    pub is_deal_relevant: bool,
    pub is_with_shipping: bool,
    pub is_extra_data: bool,
}

impl SeriesKind {
    /// Number of array elements per record: `[time, value]` or
    /// `[time, value, shipping]`.
    pub const fn stride(&self) -> usize {
        if self.is_with_shipping { 3 } else { 2 }
    }
}

/// The history series a product carries, keyed by their position in the
/// product's `csv` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CsvType {
    /// Amazon price.
    Amazon,
    /// Marketplace new price, shipping not included.
    New,
    /// Marketplace used price.
    Used,
    /// Sales rank.
    Sales,
    #[serde(rename = "LISTPRICE")]
    ListPrice,
    Collectible,
    Refurbished,
    /// 3rd party new price including shipping, fulfilled by merchant.
    NewFbmShipping,
    LightningDeal,
    /// Amazon Warehouse Deals price.
    Warehouse,
    /// Lowest 3rd party new offer fulfilled by Amazon.
    NewFba,
    /// Rating from 0 to 50 (45 = 4.5 stars).
    Rating,
    CountReviews,
    /// Buy box price including shipping; -1 when no offer qualified.
    BuyBoxShipping,
    BuyBoxUsedShipping,
    PrimeExcl,
}

impl CsvType {
    pub const ALL: [CsvType; 16] = [
        CsvType::Amazon,
        CsvType::New,
        CsvType::Used,
        CsvType::Sales,
        CsvType::ListPrice,
        CsvType::Collectible,
        CsvType::Refurbished,
        CsvType::NewFbmShipping,
        CsvType::LightningDeal,
        CsvType::Warehouse,
        CsvType::NewFba,
        CsvType::Rating,
        CsvType::CountReviews,
        CsvType::BuyBoxShipping,
        CsvType::BuyBoxUsedShipping,
        CsvType::PrimeExcl,
    ];

    pub const fn kind(self) -> SeriesKind {
        // (index, price, deal relevant, shipping, extra data)
        let (index, is_price, is_deal_relevant, is_with_shipping, is_extra_data) = match self {
            CsvType::Amazon => (0, true, true, false, false),
            CsvType::New => (1, true, true, false, false),
            CsvType::Used => (2, true, true, false, false),
            CsvType::Sales => (3, false, true, false, false),
            CsvType::ListPrice => (4, true, false, false, false),
            CsvType::Collectible => (5, true, true, false, false),
            CsvType::Refurbished => (6, true, true, false, false),
            CsvType::NewFbmShipping => (7, true, true, true, true),
            CsvType::LightningDeal => (8, true, true, false, false),
            CsvType::Warehouse => (9, true, true, false, true),
            CsvType::NewFba => (10, true, true, false, true),
            CsvType::Rating => (16, false, false, false, true),
            CsvType::CountReviews => (17, false, false, false, true),
            CsvType::BuyBoxShipping => (18, true, false, true, true),
            CsvType::BuyBoxUsedShipping => (32, true, true, true, true),
            CsvType::PrimeExcl => (33, true, true, false, true),
        };
        SeriesKind {
            index,
            is_price,
            is_deal_relevant,
            is_with_shipping,
            is_extra_data,
        }
    }

    pub const fn index(self) -> usize {
        self.kind().index
    }

    pub const fn is_price(self) -> bool {
        self.kind().is_price
    }

    pub const fn is_with_shipping(self) -> bool {
        self.kind().is_with_shipping
    }

    pub const fn is_deal_relevant(self) -> bool {
        self.kind().is_deal_relevant
    }

    pub const fn is_extra_data(self) -> bool {
        self.kind().is_extra_data
    }

    /// Look up the type stored at `index` of a product's `csv` array.
    /// Unused positions return `None`.
    pub fn from_index(index: usize) -> Option<CsvType> {
        CsvType::ALL.into_iter().find(|t| t.index() == index)
    }
}

impl From<CsvType> for SeriesKind {
    fn from(t: CsvType) -> Self {
        t.kind()
    }
}

impl TryFrom<usize> for CsvType {
    type Error = KeepaError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        CsvType::from_index(index).ok_or(KeepaError::UnknownCsvIndex(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index_matches_table() {
        for t in CsvType::ALL {
            assert_eq!(CsvType::from_index(t.index()), Some(t));
        }
        assert_eq!(CsvType::from_index(3), Some(CsvType::Sales));
        assert_eq!(CsvType::from_index(18), Some(CsvType::BuyBoxShipping));
        // gaps in the product csv array
        assert_eq!(CsvType::from_index(11), None);
        assert_eq!(CsvType::from_index(34), None);
    }

    #[test]
    fn test_try_from_unknown_index() {
        let err = CsvType::try_from(12).unwrap_err();
        assert!(matches!(err, KeepaError::UnknownCsvIndex(12)));
        assert_eq!(CsvType::try_from(32).unwrap(), CsvType::BuyBoxUsedShipping);
    }

    #[test]
    fn test_flags() {
        let shipping: Vec<_> = CsvType::ALL
            .into_iter()
            .filter(|t| t.is_with_shipping())
            .collect();
        assert_eq!(
            shipping,
            vec![
                CsvType::NewFbmShipping,
                CsvType::BuyBoxShipping,
                CsvType::BuyBoxUsedShipping
            ]
        );
        assert!(!CsvType::Sales.is_price());
        assert!(!CsvType::Rating.is_price());
        assert!(CsvType::ListPrice.is_price());
        assert!(!CsvType::ListPrice.is_deal_relevant());
        assert!(CsvType::Warehouse.is_extra_data());
        assert_eq!(CsvType::Amazon.kind().stride(), 2);
        assert_eq!(SeriesKind::from(CsvType::BuyBoxShipping).stride(), 3);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&CsvType::ListPrice).unwrap(), "\"LISTPRICE\"");
        assert_eq!(
            serde_json::to_string(&CsvType::BuyBoxUsedShipping).unwrap(),
            "\"BUY_BOX_USED_SHIPPING\""
        );
        let t: CsvType = serde_json::from_str("\"NEW_FBA\"").unwrap();
        assert_eq!(t, CsvType::NewFba);

        let kind: SeriesKind = serde_json::from_str(
            r#"{"index":0,"is_price":true,"is_deal_relevant":false,"is_with_shipping":false,"is_extra_data":false}"#,
        )
        .unwrap();
        assert_eq!(kind.stride(), 2);
        assert!(kind.is_price);
    }
}
