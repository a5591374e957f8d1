//! Read-only reference tables: crop cultivation guides, equipment rental
//! listings and government schemes.

use std::cmp::Ordering;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CropCategory {
    pub id: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CropInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub season: &'static str,
    pub plowing: &'static str,
    pub nursery: &'static str,
    pub varieties: &'static str,
    pub seed_rate: &'static str,
    pub seed_treatment: &'static str,
    pub sowing: &'static str,
    pub fertilizer: &'static str,
    pub irrigation: &'static str,
    pub harvesting: &'static str,
}

const CATEGORIES: &[CropCategory] = &[
    CropCategory { id: "vegetables", name: "Vegetables" },
    CropCategory { id: "cereals", name: "Cereals" },
    CropCategory { id: "oilseeds", name: "Oilseeds" },
    CropCategory { id: "fruits", name: "Fruits" },
    CropCategory { id: "cash-crops", name: "Cash Crops" },
    CropCategory { id: "spices", name: "Spices" },
    CropCategory { id: "pulses", name: "Pulses" },
    CropCategory { id: "flowers", name: "Flowers" },
    CropCategory { id: "hydroponic", name: "Hydroponic" },
];

const CROPS: &[CropInfo] = &[
    CropInfo {
        id: "tomato",
        name: "Tomato",
        category: "vegetables",
        season: "Kharif & Rabi",
        plowing: "2–3 deep ploughings with FYM",
        nursery: "25–30 days in raised beds",
        varieties: "Pusa Ruby, Arka Vikas",
        seed_rate: "300–400 g/ha",
        seed_treatment: "Fungicide + Trichoderma",
        sowing: "Transplant seedlings at 60×45 cm spacing",
        fertilizer: "100:50:50 NPK kg/ha",
        irrigation: "At 7–10 day intervals",
        harvesting: "70–90 days after transplanting",
    },
    CropInfo {
        id: "carrot",
        name: "Carrot",
        category: "vegetables",
        season: "Winter crop",
        plowing: "Fine tilth with organic manure",
        nursery: "Direct sowing, no transplant",
        varieties: "Pusa Kesar, Nantes",
        seed_rate: "4–5 kg/ha",
        seed_treatment: "Warm water soaking",
        sowing: "Line sowing, 30 cm apart",
        fertilizer: "40:50:100 NPK kg/ha",
        irrigation: "Light frequent irrigation",
        harvesting: "90–100 days",
    },
    CropInfo {
        id: "brinjal",
        name: "Brinjal (Eggplant)",
        category: "vegetables",
        season: "Year-round in tropical areas",
        plowing: "2–3 ploughings with FYM",
        nursery: "30–40 day seedlings",
        varieties: "Pusa Purple, Arka Navneet",
        seed_rate: "300–400 g/ha",
        seed_treatment: "Bavistin dressing",
        sowing: "Transplant at 60×45 cm spacing",
        fertilizer: "100:60:80 NPK kg/ha",
        irrigation: "At 7-day intervals",
        harvesting: "120–130 days",
    },
    CropInfo {
        id: "potato",
        name: "Potato",
        category: "vegetables",
        season: "Rabi",
        plowing: "Fine tilth with FYM",
        nursery: "Tubers planted directly",
        varieties: "Kufri Jyoti, Kufri Badshah",
        seed_rate: "2.5 t/ha tubers",
        seed_treatment: "Fungicide dipping",
        sowing: "60×20 cm spacing",
        fertilizer: "150:100:100 NPK kg/ha",
        irrigation: "At critical stages (tuber initiation)",
        harvesting: "90–120 days",
    },
    CropInfo {
        id: "bitter-gourd",
        name: "Bitter Gourd",
        category: "vegetables",
        season: "Summer & Rainy",
        plowing: "Raised beds with FYM",
        nursery: "Direct sowing",
        varieties: "Pusa Do Mausami, Arka Harit",
        seed_rate: "4–5 kg/ha",
        seed_treatment: "Hot water soaking",
        sowing: "2 seeds/hill, 1.5 m apart",
        fertilizer: "100:50:50 NPK kg/ha",
        irrigation: "At 7-day intervals",
        harvesting: "60–70 days",
    },
    CropInfo {
        id: "cucumber",
        name: "Cucumber",
        category: "vegetables",
        season: "Summer crop",
        plowing: "Fine tilth, raised beds",
        nursery: "Direct sowing",
        varieties: "Poinsette, Malini",
        seed_rate: "3–4 kg/ha",
        seed_treatment: "Trichoderma powder",
        sowing: "60×45 cm spacing",
        fertilizer: "80:60:40 NPK kg/ha",
        irrigation: "At 5–6 day intervals",
        harvesting: "50–60 days",
    },
    CropInfo {
        id: "rice",
        name: "Rice (Paddy)",
        category: "cereals",
        season: "Kharif",
        plowing: "Puddling in standing water",
        nursery: "25–30 day seedlings",
        varieties: "Jaya, IR-64",
        seed_rate: "30–35 kg/ha",
        seed_treatment: "Salt solution + fungicide",
        sowing: "Transplanting 20×15 cm spacing",
        fertilizer: "120:60:40 NPK kg/ha",
        irrigation: "Continuous flooding",
        harvesting: "120–150 days",
    },
];

pub fn crop_categories() -> &'static [CropCategory] {
    CATEGORIES
}

pub fn crops() -> &'static [CropInfo] {
    CROPS
}

pub fn crops_by_category(category_id: &str) -> Vec<&'static CropInfo> {
    CROPS
        .iter()
        .filter(|crop| crop.category == category_id)
        .collect()
}

pub fn crop_by_id(id: &str) -> Option<&'static CropInfo> {
    CROPS.iter().find(|crop| crop.id == id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentKind {
    Tractor,
    Drone,
    Harvester,
    Tiller,
    Sprayer,
}

impl EquipmentKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "tractor" | "tractors" => Some(Self::Tractor),
            "drone" | "drones" => Some(Self::Drone),
            "harvester" | "harvesters" => Some(Self::Harvester),
            "tiller" | "tillers" => Some(Self::Tiller),
            "sprayer" | "sprayers" => Some(Self::Sprayer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EquipmentSort {
    #[default]
    Name,
    Price,
    Rating,
}

impl EquipmentSort {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "name" => Some(Self::Name),
            "price" => Some(Self::Price),
            "rating" => Some(Self::Rating),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Equipment {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: EquipmentKind,
    pub owner: &'static str,
    pub location: &'static str,
    pub price_per_day: u32,
    pub rating: f32,
    pub available: bool,
    pub description: &'static str,
    pub phone: &'static str,
}

const EQUIPMENT: &[Equipment] = &[
    Equipment {
        id: "1",
        name: "Mahindra 275 DI Tractor",
        kind: EquipmentKind::Tractor,
        owner: "Ravi Kumar",
        location: "Thrissur, Kerala",
        price_per_day: 1200,
        rating: 4.8,
        available: true,
        description: "35 HP tractor suitable for small to medium farms. Includes rotavator attachment.",
        phone: "+91 9876543210",
    },
    Equipment {
        id: "2",
        name: "DJI Agras T20 Drone",
        kind: EquipmentKind::Drone,
        owner: "Tech Agri Solutions",
        location: "Kochi, Kerala",
        price_per_day: 2500,
        rating: 4.9,
        available: true,
        description: "Advanced spraying drone for pesticide and fertilizer application. 20L tank capacity.",
        phone: "+91 9876543211",
    },
    Equipment {
        id: "3",
        name: "Kubota Combine Harvester",
        kind: EquipmentKind::Harvester,
        owner: "Suresh Pillai",
        location: "Alappuzha, Kerala",
        price_per_day: 3500,
        rating: 4.7,
        available: false,
        description: "Efficient rice harvester with 4-foot cutting width. Ideal for paddy fields.",
        phone: "+91 9876543212",
    },
    Equipment {
        id: "4",
        name: "Power Tiller - VST 130",
        kind: EquipmentKind::Tiller,
        owner: "Meera Nair",
        location: "Kottayam, Kerala",
        price_per_day: 800,
        rating: 4.5,
        available: true,
        description: "13 HP power tiller perfect for vegetable farming and small field operations.",
        phone: "+91 9876543213",
    },
    Equipment {
        id: "5",
        name: "High Pressure Sprayer",
        kind: EquipmentKind::Sprayer,
        owner: "Green Farm Equipment",
        location: "Kozhikode, Kerala",
        price_per_day: 400,
        rating: 4.6,
        available: true,
        description: "Motorized sprayer for efficient pesticide application in large fields.",
        phone: "+91 9876543214",
    },
];

pub fn list_equipment(kind: Option<EquipmentKind>, sort: EquipmentSort) -> Vec<&'static Equipment> {
    let mut listed = EQUIPMENT
        .iter()
        .filter(|item| kind.map_or(true, |kind| item.kind == kind))
        .collect::<Vec<_>>();

    listed.sort_by(|a, b| match sort {
        EquipmentSort::Price => a.price_per_day.cmp(&b.price_per_day),
        EquipmentSort::Rating => b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal),
        EquipmentSort::Name => a.name.cmp(b.name),
    });

    listed
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeStatus {
    Active,
    Upcoming,
    Closed,
}

impl SchemeStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "upcoming" => Some(Self::Upcoming),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scheme {
    pub id: &'static str,
    pub name: &'static str,
    pub department: &'static str,
    pub subsidy: &'static str,
    pub eligibility: &'static [&'static str],
    pub description: &'static str,
    pub benefits: &'static [&'static str],
    pub application_link: &'static str,
    pub status: SchemeStatus,
}

const SCHEMES: &[Scheme] = &[
    Scheme {
        id: "1",
        name: "Pradhan Mantri Kisan Samman Nidhi (PM-KISAN)",
        department: "Central Government",
        subsidy: "₹6,000/year",
        eligibility: &[
            "Small and marginal farmers",
            "Land holding up to 2 hectares",
            "Valid Aadhaar card required",
        ],
        description: "Direct income support scheme providing financial assistance to farmer families.",
        benefits: &[
            "₹2,000 installments every 4 months",
            "Direct bank transfer",
            "No processing fee",
        ],
        application_link: "https://pmkisan.gov.in/",
        status: SchemeStatus::Active,
    },
    Scheme {
        id: "2",
        name: "Kerala State Organic Farming Mission",
        department: "Kerala Agriculture Department",
        subsidy: "Up to 50%",
        eligibility: &[
            "Kerala resident farmers",
            "Minimum 0.1 hectare land",
            "Commitment to organic farming",
        ],
        description: "Promoting organic farming practices through subsidies and technical support.",
        benefits: &[
            "50% subsidy on organic inputs",
            "Free soil testing",
            "Certification support",
            "Market linkage assistance",
        ],
        application_link: "https://keralaagriculture.gov.in/",
        status: SchemeStatus::Active,
    },
    Scheme {
        id: "3",
        name: "Kisan Credit Card (KCC)",
        department: "All Banks",
        subsidy: "Interest subsidy 4%",
        eligibility: &[
            "All farmers (owner/tenant)",
            "Valid land documents",
            "Good credit history preferred",
        ],
        description: "Provides adequate and timely credit support for comprehensive agricultural needs.",
        benefits: &[
            "Credit limit based on land holding",
            "Flexible repayment terms",
            "Insurance coverage",
            "Lower interest rates",
        ],
        application_link: "https://www.nabard.org/",
        status: SchemeStatus::Active,
    },
    Scheme {
        id: "4",
        name: "Prime Minister's Micro Irrigation Scheme (PMKSY)",
        department: "Central Government",
        subsidy: "55% for general, 75% for SC/ST",
        eligibility: &[
            "All categories of farmers",
            "Valid land ownership documents",
            "Water source availability",
        ],
        description: "Promoting water use efficiency through micro irrigation systems.",
        benefits: &[
            "Drip irrigation subsidy",
            "Sprinkler system support",
            "Technical guidance",
            "Water saving technology",
        ],
        application_link: "https://pmksy.gov.in/",
        status: SchemeStatus::Active,
    },
    Scheme {
        id: "5",
        name: "Rashtriya Krishi Vikas Yojana (RKVY)",
        department: "Kerala Planning Board",
        subsidy: "Varies by project",
        eligibility: &[
            "Farmer Producer Organizations",
            "Cooperative societies",
            "Individual farmers for specific projects",
        ],
        description: "State-led agriculture development initiatives with flexible funding.",
        benefits: &[
            "Infrastructure development",
            "Technology adoption support",
            "Capacity building programs",
            "Market development",
        ],
        application_link: "https://rkvy.nic.in/",
        status: SchemeStatus::Upcoming,
    },
    Scheme {
        id: "6",
        name: "Soil Health Card Scheme",
        department: "Kerala Agriculture Department",
        subsidy: "100% free",
        eligibility: &[
            "All farmers in Kerala",
            "Valid land documents",
            "Consent for soil sampling",
        ],
        description: "Free soil testing and health cards with nutrient recommendations.",
        benefits: &[
            "Free soil analysis",
            "Customized fertilizer recommendations",
            "Digital soil health card",
            "Expert advisory services",
        ],
        application_link: "https://soilhealth.dac.gov.in/",
        status: SchemeStatus::Active,
    },
];

pub fn schemes() -> &'static [Scheme] {
    SCHEMES
}

pub fn schemes_by_status(status: SchemeStatus) -> Vec<&'static Scheme> {
    SCHEMES.iter().filter(|scheme| scheme.status == status).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrentWeather {
    pub temperature_c: i32,
    pub condition: &'static str,
    pub humidity_pct: u32,
    pub wind_speed_kmh: u32,
    pub rainfall_mm: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForecastDay {
    pub day: &'static str,
    pub temperature_c: i32,
    pub condition: &'static str,
    pub rainfall_mm: u32,
}

const CURRENT_WEATHER: CurrentWeather = CurrentWeather {
    temperature_c: 28,
    condition: "Partly Cloudy",
    humidity_pct: 75,
    wind_speed_kmh: 12,
    rainfall_mm: 0,
};

const FORECAST: &[ForecastDay] = &[
    ForecastDay { day: "Today", temperature_c: 28, condition: "Partly Cloudy", rainfall_mm: 0 },
    ForecastDay { day: "Tomorrow", temperature_c: 26, condition: "Light Rain", rainfall_mm: 5 },
    ForecastDay { day: "Wednesday", temperature_c: 24, condition: "Moderate Rain", rainfall_mm: 15 },
    ForecastDay { day: "Thursday", temperature_c: 27, condition: "Cloudy", rainfall_mm: 2 },
];

pub fn current_weather() -> &'static CurrentWeather {
    &CURRENT_WEATHER
}

pub fn forecast() -> &'static [ForecastDay] {
    FORECAST
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTrend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PricePoint {
    pub day: &'static str,
    pub price_per_kg: u32,
    pub trend: PriceTrend,
}

/// Recent market prices for one crop, oldest first, in rupees per kg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CropPrices {
    pub crop: &'static str,
    pub points: &'static [PricePoint],
}

const fn point(day: &'static str, price_per_kg: u32, trend: PriceTrend) -> PricePoint {
    PricePoint { day, price_per_kg, trend }
}

const MARKET_PRICES: &[CropPrices] = &[
    CropPrices {
        crop: "tomato",
        points: &[
            point("2 days ago", 25, PriceTrend::Down),
            point("Yesterday", 28, PriceTrend::Up),
            point("Today", 30, PriceTrend::Up),
            point("Tomorrow", 32, PriceTrend::Up),
        ],
    },
    CropPrices {
        crop: "rice",
        points: &[
            point("2 days ago", 18, PriceTrend::Stable),
            point("Yesterday", 18, PriceTrend::Stable),
            point("Today", 19, PriceTrend::Up),
            point("Tomorrow", 20, PriceTrend::Up),
        ],
    },
    CropPrices {
        crop: "pepper",
        points: &[
            point("2 days ago", 120, PriceTrend::Up),
            point("Yesterday", 115, PriceTrend::Down),
            point("Today", 118, PriceTrend::Up),
            point("Tomorrow", 120, PriceTrend::Up),
        ],
    },
];

pub fn market_prices() -> &'static [CropPrices] {
    MARKET_PRICES
}

pub fn market_prices_for(crop: &str) -> Option<&'static CropPrices> {
    let crop = crop.trim();
    MARKET_PRICES
        .iter()
        .find(|prices| prices.crop.eq_ignore_ascii_case(crop))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientStatus {
    Low,
    Medium,
    Optimal,
    Good,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoilReading {
    pub nutrient: &'static str,
    pub value: f64,
    /// Empty for pH.
    pub unit: &'static str,
    pub status: NutrientStatus,
    pub recommendation: &'static str,
}

// Sample analysis shown for every submitted soil test.
const SOIL_ANALYSIS: &[SoilReading] = &[
    SoilReading {
        nutrient: "ph",
        value: 6.2,
        unit: "",
        status: NutrientStatus::Optimal,
        recommendation: "Maintain current pH levels",
    },
    SoilReading {
        nutrient: "nitrogen",
        value: 180.0,
        unit: "kg/ha",
        status: NutrientStatus::Low,
        recommendation: "Apply nitrogen-rich fertilizer",
    },
    SoilReading {
        nutrient: "phosphorus",
        value: 25.0,
        unit: "kg/ha",
        status: NutrientStatus::Optimal,
        recommendation: "Current levels are good",
    },
    SoilReading {
        nutrient: "potassium",
        value: 150.0,
        unit: "kg/ha",
        status: NutrientStatus::Medium,
        recommendation: "Consider potash application",
    },
    SoilReading {
        nutrient: "organic_matter",
        value: 3.2,
        unit: "%",
        status: NutrientStatus::Good,
        recommendation: "Continue organic farming practices",
    },
];

pub fn soil_analysis() -> &'static [SoilReading] {
    SOIL_ANALYSIS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_crops_by_category_and_id() {
        let cereals = crops_by_category("cereals");
        assert_eq!(cereals.len(), 1);
        assert_eq!(cereals[0].id, "rice");

        assert_eq!(crop_by_id("tomato").map(|c| c.fertilizer), Some("100:50:50 NPK kg/ha"));
        assert!(crop_by_id("coconut").is_none());
        assert!(crops_by_category("flowers").is_empty());
    }

    #[test]
    fn every_crop_belongs_to_a_known_category() {
        for crop in crops() {
            assert!(
                crop_categories().iter().any(|c| c.id == crop.category),
                "{} has unknown category",
                crop.id
            );
        }
    }

    #[test]
    fn sorts_equipment() {
        let by_price = list_equipment(None, EquipmentSort::Price);
        assert_eq!(by_price.first().map(|e| e.price_per_day), Some(400));
        assert_eq!(by_price.last().map(|e| e.price_per_day), Some(3500));

        let by_rating = list_equipment(None, EquipmentSort::Rating);
        assert_eq!(by_rating[0].name, "DJI Agras T20 Drone");

        let by_name = list_equipment(None, EquipmentSort::default());
        assert_eq!(by_name[0].name, "DJI Agras T20 Drone");
        assert_eq!(by_name[4].name, "Power Tiller - VST 130");
    }

    #[test]
    fn filters_equipment_by_kind() {
        let drones = list_equipment(Some(EquipmentKind::Drone), EquipmentSort::Name);
        assert_eq!(drones.len(), 1);
        assert_eq!(EquipmentKind::parse("Tractors"), Some(EquipmentKind::Tractor));
    }

    #[test]
    fn filters_schemes_by_status() {
        assert_eq!(schemes().len(), 6);
        let upcoming = schemes_by_status(SchemeStatus::Upcoming);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].id, "5");
        assert!(schemes_by_status(SchemeStatus::Closed).is_empty());
    }

    #[test]
    fn forecast_covers_four_days_from_today() {
        assert_eq!(current_weather().condition, forecast()[0].condition);
        let days = forecast().iter().map(|d| d.day).collect::<Vec<_>>();
        assert_eq!(days, vec!["Today", "Tomorrow", "Wednesday", "Thursday"]);
        assert_eq!(forecast().iter().map(|d| d.rainfall_mm).max(), Some(15));
    }

    #[test]
    fn looks_up_market_prices_by_crop() {
        assert_eq!(market_prices().len(), 3);

        let pepper = market_prices_for(" Pepper ").unwrap();
        assert_eq!(pepper.points[1].price_per_kg, 115);
        assert_eq!(pepper.points[1].trend, PriceTrend::Down);

        let rice = market_prices_for("RICE").unwrap();
        assert_eq!(rice.points.last().map(|p| p.price_per_kg), Some(20));
        assert!(market_prices_for("cardamom").is_none());
    }

    #[test]
    fn soil_analysis_flags_low_nitrogen() {
        let low = soil_analysis()
            .iter()
            .filter(|r| r.status == NutrientStatus::Low)
            .map(|r| r.nutrient)
            .collect::<Vec<_>>();
        assert_eq!(low, vec!["nitrogen"]);
        assert_eq!(soil_analysis()[0].unit, "");
        assert_eq!(soil_analysis()[4].unit, "%");
    }
}
