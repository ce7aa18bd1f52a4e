//! Static crop descriptions
//!
//! Keyed by the lowercase class name the classifier emits.

use serde::{Serialize, Serializer};

/// Descriptive text for a crop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CropProfile {
    pub description: &'static str,
    pub optimal_conditions: &'static str,
}

/// Profile used when a class has no entry in [`CROP_PROFILES`]
pub const GENERIC_CROP_PROFILE: CropProfile = CropProfile {
    description: "Recommended crop based on current soil and weather conditions",
    optimal_conditions: "Suitable for current environmental parameters",
};

/// All known crops, in catalogue order
pub static CROP_PROFILES: &[(&str, CropProfile)] = &[
    (
        "rice",
        CropProfile {
            description: "Staple food crop, requires adequate water and warm climate",
            optimal_conditions: "High humidity (80-85%), temperature 20-35°C, pH 5.5-7.0, high nitrogen (80-100), annual rainfall above 1500 mm",
        },
    ),
    (
        "maize",
        CropProfile {
            description: "Versatile crop with high yield potential",
            optimal_conditions: "Moderate humidity (55-75%), temperature 18-26°C, pH 5.7-6.8, moderate NPK, annual rainfall 500-1200 mm",
        },
    ),
    (
        "chickpea",
        CropProfile {
            description: "Protein-rich legume, drought tolerant",
            optimal_conditions: "Low humidity (14-20%), temperature 17-21°C, pH 6.2-8.9, moderate phosphorus, annual rainfall below 700 mm",
        },
    ),
    (
        "kidneybeans",
        CropProfile {
            description: "High-protein legume crop",
            optimal_conditions: "Moderate humidity (18-25%), temperature 15-25°C, pH 5.5-6.0, low nitrogen (0-40)",
        },
    ),
    (
        "pigeonpeas",
        CropProfile {
            description: "Drought-resistant legume, soil enriching",
            optimal_conditions: "Moderate humidity (30-70%), temperature 18-37°C, pH 4.5-7.5, low NPK",
        },
    ),
    (
        "mothbeans",
        CropProfile {
            description: "Drought-tolerant crop for arid regions",
            optimal_conditions: "Moderate humidity (40-65%), temperature 24-32°C, pH 3.5-9.9, low to moderate NPK",
        },
    ),
    (
        "mungbean",
        CropProfile {
            description: "Short-season legume with high protein",
            optimal_conditions: "High humidity (80-90%), temperature 27-30°C, pH 6.2-7.2, low NPK",
        },
    ),
    (
        "blackgram",
        CropProfile {
            description: "Nutritious pulse crop",
            optimal_conditions: "Moderate humidity (60-70%), temperature 25-35°C, pH 6.5-7.8, moderate to high NPK",
        },
    ),
    (
        "lentil",
        CropProfile {
            description: "Cool-season legume, high protein",
            optimal_conditions: "Moderate humidity (60-70%), temperature 18-30°C, pH 5.9-7.8, low to moderate NPK",
        },
    ),
    (
        "pomegranate",
        CropProfile {
            description: "Antioxidant-rich fruit crop",
            optimal_conditions: "High humidity (85-95%), temperature 18-25°C, pH 5.6-7.2, low NPK",
        },
    ),
    (
        "banana",
        CropProfile {
            description: "High-yield tropical fruit",
            optimal_conditions: "Moderate humidity (75-85%), temperature 25-30°C, pH 5.5-7.0, high to very high NPK",
        },
    ),
    (
        "mango",
        CropProfile {
            description: "King of fruits, tropical crop",
            optimal_conditions: "Moderate humidity (45-55%), temperature 27-36°C, pH 4.5-7.0, low to moderate NPK",
        },
    ),
    (
        "grapes",
        CropProfile {
            description: "High-value fruit crop for wine and table",
            optimal_conditions: "High humidity (80-85%), temperature 8-42°C, pH 5.5-6.5, very high phosphorus and potassium",
        },
    ),
    (
        "watermelon",
        CropProfile {
            description: "High-water content summer fruit",
            optimal_conditions: "High humidity (80-90%), temperature 24-27°C, pH 6.0-7.0, high nitrogen and potassium",
        },
    ),
    (
        "muskmelon",
        CropProfile {
            description: "Sweet aromatic melon",
            optimal_conditions: "High humidity (90-95%), temperature 27-30°C, pH 6.0-6.8, moderate to high NPK",
        },
    ),
    (
        "apple",
        CropProfile {
            description: "Temperate fruit requiring cold winters",
            optimal_conditions: "High humidity (90-95%), temperature 21-24°C, pH 5.5-6.5, very high phosphorus and potassium",
        },
    ),
    (
        "orange",
        CropProfile {
            description: "Citrus fruit rich in vitamin C",
            optimal_conditions: "High humidity (90-95%), temperature 10-35°C, pH 6.0-8.0, low to moderate NPK",
        },
    ),
    (
        "papaya",
        CropProfile {
            description: "Fast-growing tropical fruit",
            optimal_conditions: "High humidity (90-95%), temperature 23-43°C, pH 6.5-7.0, moderate to high NPK",
        },
    ),
    (
        "coconut",
        CropProfile {
            description: "Multipurpose palm crop",
            optimal_conditions: "High humidity (90-100%), temperature 25-30°C, pH 5.5-6.5, low to moderate NPK",
        },
    ),
    (
        "cotton",
        CropProfile {
            description: "Major fiber crop requiring warm climate",
            optimal_conditions: "Moderate humidity (75-85%), temperature 22-26°C, pH 5.8-8.0, very high nitrogen and potassium, annual rainfall below 1000 mm",
        },
    ),
    (
        "jute",
        CropProfile {
            description: "Natural fiber crop for textiles",
            optimal_conditions: "High humidity (70-90%), temperature 23-27°C, pH 6.0-7.5, moderate to high NPK",
        },
    ),
    (
        "coffee",
        CropProfile {
            description: "Cash crop requiring specific altitude and climate",
            optimal_conditions: "Moderate humidity (50-70%), temperature 23-27°C, pH 6.0-7.5, moderate to high NPK",
        },
    ),
];

/// Look up a crop profile by class name, case-insensitively
pub fn crop_profile(name: &str) -> Option<&'static CropProfile> {
    let key = name.trim().to_lowercase();
    CROP_PROFILES
        .iter()
        .find(|(crop, _)| *crop == key)
        .map(|(_, profile)| profile)
}

/// Look up a crop profile, substituting [`GENERIC_CROP_PROFILE`] for unknown names
pub fn crop_profile_or_generic(name: &str) -> CropProfile {
    crop_profile(name).copied().unwrap_or(GENERIC_CROP_PROFILE)
}

/// Serializable view of the whole catalogue, as a name-keyed map in catalogue order
#[derive(Debug, Clone, Copy, Default)]
pub struct CropCatalog;

impl CropCatalog {
    pub fn len(&self) -> usize {
        CROP_PROFILES.len()
    }

    pub fn is_empty(&self) -> bool {
        CROP_PROFILES.is_empty()
    }
}

impl Serialize for CropCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(CROP_PROFILES.iter().map(|(name, profile)| (*name, profile)))
    }
}
