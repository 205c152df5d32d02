use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PoiCategory {
    Hotel,
    Restaurant,
    Attraction,
}

impl PoiCategory {
    pub const ALL: [PoiCategory; 3] = [
        PoiCategory::Hotel,
        PoiCategory::Restaurant,
        PoiCategory::Attraction,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PoiCategory::Hotel => "hotel",
            PoiCategory::Restaurant => "restaurant",
            PoiCategory::Attraction => "attraction",
        }
    }

    /// Label with the first letter upper-cased, as shown in marker popups.
    pub fn title(&self) -> &'static str {
        match self {
            PoiCategory::Hotel => "Hotel",
            PoiCategory::Restaurant => "Restaurant",
            PoiCategory::Attraction => "Attraction",
        }
    }

    /// Overpass QL tag filter selecting this category.
    pub fn tag_filter(&self) -> &'static str {
        match self {
            PoiCategory::Hotel => r#"["tourism"="hotel"]"#,
            PoiCategory::Restaurant => r#"["amenity"="restaurant"]"#,
            PoiCategory::Attraction => r#"["tourism"~"attraction|museum|viewpoint"]"#,
        }
    }
}

impl std::fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
