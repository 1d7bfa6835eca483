use serde::{Deserialize, Serialize};

/// One marketplace listing at a point in time.
///
/// Rebuilt wholesale from every snapshot; never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub class_id: String,
    pub instance_id: String,
    /// Price in minor currency units, as transported
    pub price: u64,
    pub available_count: u32,
    /// Quality/category code, passed through verbatim
    pub quality: String,
    /// Sticker ids in listing order; empty when the item carries none
    pub sticker_ids: Vec<String>,
    pub name: String,
    /// Absent on some rows; empty string then
    #[serde(default)]
    pub hash_name: String,
    /// Listing page, derived from class and instance ids
    pub url: String,
}

impl Item {
    /// De-duplication identity. A listing can reappear with different stock
    /// or price but the same identity.
    pub fn identity(&self) -> ItemId {
        ItemId {
            class_id: self.class_id.clone(),
            instance_id: self.instance_id.clone(),
            sticker_ids: self.sticker_ids.clone(),
        }
    }

    /// Price rendered in major units for reporting.
    pub fn price_display(&self) -> String {
        format!("{}.{:02}", self.price / 100, self.price % 100)
    }

    /// Derive the listing page URL for a class/instance pair.
    pub fn listing_url(base_url: &str, class_id: &str, instance_id: &str) -> String {
        format!("{}/item/{}-{}", base_url, class_id, instance_id)
    }
}

/// Identity of a listing for de-duplication: the class/instance pair plus
/// the sticker ids it carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId {
    pub class_id: String,
    pub instance_id: String,
    pub sticker_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(class_id: &str, instance_id: &str, sticker_ids: &[&str]) -> Item {
        Item {
            class_id: class_id.to_string(),
            instance_id: instance_id.to_string(),
            price: 123_45,
            available_count: 1,
            quality: "FN".to_string(),
            sticker_ids: sticker_ids.iter().map(|s| s.to_string()).collect(),
            name: "Test Item".to_string(),
            hash_name: String::new(),
            url: Item::listing_url("https://market.test", class_id, instance_id),
        }
    }

    #[test]
    fn identity_ignores_price_and_stock() {
        let mut a = item("A", "1", &["10", "20"]);
        let mut b = item("A", "1", &["10", "20"]);
        a.price = 100;
        b.price = 999;
        a.available_count = 1;
        b.available_count = 7;

        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn identity_distinguishes_sticker_content() {
        let a = item("A", "1", &["10"]);
        let b = item("A", "1", &["20"]);

        assert_ne!(a.identity(), b.identity());
    }

    #[test]
    fn price_display_is_major_units() {
        let mut i = item("A", "1", &[]);
        i.price = 123_45;
        assert_eq!(i.price_display(), "123.45");
        i.price = 5;
        assert_eq!(i.price_display(), "0.05");
    }

    #[test]
    fn listing_url_shape() {
        assert_eq!(
            Item::listing_url("https://market.test", "17", "99"),
            "https://market.test/item/17-99"
        );
    }
}
