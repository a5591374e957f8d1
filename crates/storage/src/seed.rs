use chrono::{Duration, Utc};
use krishi_core::{Availability, CommunityPost, CropPlan, FarmerProfile, Labour};

pub(crate) fn labour() -> Vec<Labour> {
    vec![
        Labour {
            id: "1".to_string(),
            name: "രാജേഷ് കുമാർ / Rajesh Kumar".to_string(),
            mobile_number: "9876543210".to_string(),
            availability: Availability::Available,
            skills: strings(&["Plowing", "Harvesting", "Irrigation"]),
            experience: "5 years".to_string(),
            daily_wage: 500.0,
        },
        Labour {
            id: "2".to_string(),
            name: "സുരേഷ് നായർ / Suresh Nair".to_string(),
            mobile_number: "9876543211".to_string(),
            availability: Availability::NotAvailable,
            skills: strings(&["Spraying", "Weeding", "Planting"]),
            experience: "8 years".to_string(),
            daily_wage: 600.0,
        },
        Labour {
            id: "3".to_string(),
            name: "അനിൽ വർമ്മ / Anil Varma".to_string(),
            mobile_number: "9876543212".to_string(),
            availability: Availability::Available,
            skills: strings(&["Tractor Operation", "Equipment Maintenance"]),
            experience: "10 years".to_string(),
            daily_wage: 800.0,
        },
    ]
}

pub(crate) fn crop_plans() -> Vec<CropPlan> {
    [("Tomato", 2.0, "Good"), ("Rice", 5.0, "Excellent"), ("Pepper", 1.0, "Average")]
        .into_iter()
        .enumerate()
        .map(|(idx, (crop, area, outlook))| CropPlan {
            id: (idx + 1).to_string(),
            crop: crop.to_string(),
            area_acres: area,
            yield_outlook: Some(outlook.to_string()),
        })
        .collect()
}

pub(crate) fn profile() -> FarmerProfile {
    FarmerProfile {
        name: "Ravi Kumar".to_string(),
        email: "ravi.kumar@email.com".to_string(),
        phone: "+91 9876543210".to_string(),
        location: "Thrissur, Kerala".to_string(),
        farm_size_acres: 5.2,
        primary_crops: strings(&["Rice", "Coconut", "Pepper"]),
        experience_years: 15,
        bio: "Organic farmer passionate about sustainable agriculture and community development."
            .to_string(),
    }
}

pub(crate) fn posts() -> Vec<CommunityPost> {
    let now = Utc::now();
    vec![
        post(
            "1",
            "Ravi Kumar",
            "Thrissur, Kerala",
            "Just harvested my first batch of organic tomatoes! The yield is better than expected. Used completely natural fertilizers this season. Anyone interested in buying organic produce?",
            "Harvest Update",
            (24, 8, false),
            now - Duration::hours(2),
        ),
        post(
            "2",
            "Meera Nair",
            "Kottayam, Kerala",
            "Need advice on pest control for pepper plants. Noticed some white spots on leaves. Has anyone faced similar issues? Looking for organic solutions.",
            "Help Needed",
            (12, 15, true),
            now - Duration::hours(4),
        ),
        post(
            "3",
            "Suresh Pillai",
            "Alappuzha, Kerala",
            "Monsoon season is here! Time to prepare the fields for rice cultivation. Sharing some traditional techniques my grandfather taught me for better water management during heavy rains.",
            "Tips & Tricks",
            (31, 12, false),
            now - Duration::hours(6),
        ),
        post(
            "4",
            "Priya Menon",
            "Kozhikode, Kerala",
            "Successfully implemented drip irrigation in my vegetable garden. Water consumption reduced by 40%! Investment paid off within 6 months. Happy to share details with anyone interested.",
            "Success Story",
            (45, 20, true),
            now - Duration::days(1),
        ),
    ]
}

fn post(
    id: &str,
    author: &str,
    location: &str,
    content: &str,
    category: &str,
    (likes, comments, liked): (u32, u32, bool),
    posted_at: chrono::DateTime<Utc>,
) -> CommunityPost {
    CommunityPost {
        id: id.to_string(),
        author: author.to_string(),
        location: location.to_string(),
        content: content.to_string(),
        category: category.to_string(),
        likes,
        comments,
        liked,
        posted_at,
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
