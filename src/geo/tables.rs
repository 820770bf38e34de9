//! Static geographic lookup tables.
//!
//! Append-only: unknown place names are reported by the resolver, never
//! fatal. New entries go here and nowhere else.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Canonical country name (as found in the datasets) to ISO 3166-1 alpha-3.
pub(crate) static COUNTRY_ISO3: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Canada", "CAN"),
        ("États-Unis", "USA"),
        ("États-Unis (y compris Hawaii)", "USA"),
        ("Mexique", "MEX"),
        ("Brésil", "BRA"),
        ("Argentine", "ARG"),
        ("Chili", "CHL"),
        ("Colombie", "COL"),
        ("Pérou", "PER"),
        ("Royaume-Uni", "GBR"),
        ("Allemagne", "DEU"),
        ("Italie", "ITA"),
        ("Espagne", "ESP"),
        ("France", "FRA"),
        ("Belgique", "BEL"),
        ("Pays-Bas", "NLD"),
        ("Suisse", "CHE"),
        ("Autriche", "AUT"),
        ("Portugal", "PRT"),
        ("Grèce", "GRC"),
        ("Pologne", "POL"),
        ("Suède", "SWE"),
        ("Norvège", "NOR"),
        ("Danemark", "DNK"),
        ("Finlande", "FIN"),
        ("Irlande", "IRL"),
        ("Chine", "CHN"),
        ("Japon", "JPN"),
        ("Corée du Sud", "KOR"),
        ("Inde", "IND"),
        ("Thaïlande", "THA"),
        ("Vietnam", "VNM"),
        ("Singapour", "SGP"),
        ("Malaisie", "MYS"),
        ("Indonésie", "IDN"),
        ("Philippines", "PHL"),
        ("Australie", "AUS"),
        ("Nouvelle-Zélande", "NZL"),
        ("Afrique du Sud", "ZAF"),
        ("Maroc", "MAR"),
        ("Tunisie", "TUN"),
        ("Algérie", "DZA"),
        ("Égypte", "EGY"),
        ("Russie", "RUS"),
        ("Turquie", "TUR"),
        ("Arabie Saoudite", "SAU"),
        ("Émirats Arabes Unis", "ARE"),
        ("Israël", "ISR"),
        ("Liban", "LBN"),
    ])
});

/// World-region name to (latitude, longitude) for scatter maps.
pub(crate) static REGION_COORDS: Lazy<HashMap<&'static str, (f64, f64)>> = Lazy::new(|| {
    HashMap::from([
        ("Europe", (50.0, 10.0)),
        ("Europe (hors France)", (50.0, 10.0)),
        ("Asie", (35.0, 105.0)),
        ("Amérique du Nord", (45.0, -100.0)),
        ("Amérique du Sud", (-15.0, -60.0)),
        ("Amérique Centrale", (15.0, -90.0)),
        ("Afrique", (0.0, 20.0)),
        ("Océanie", (-25.0, 135.0)),
        ("Moyen-Orient", (30.0, 45.0)),
    ])
});
