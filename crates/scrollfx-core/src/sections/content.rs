//! Static ordered content supplied at mount time

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    /// Stable id used for target keys and navigation
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub subservices: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub name: String,
    pub position: String,
    pub quote: String,
    pub highlight: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub subtitle: String,
    pub year: String,
    pub link: String,
}

/// Two projects shown side by side in one stack slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectPair {
    pub left: Project,
    pub right: Project,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteContent {
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub projects: Vec<ProjectPair>,
}

fn service(id: &str, name: &str, description: &str, subservices: &[&str]) -> Service {
    Service {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        subservices: subservices.iter().map(|s| s.to_string()).collect(),
    }
}

fn review(name: &str, position: &str, quote: &str, highlight: &str) -> Review {
    Review {
        name: name.to_string(),
        position: position.to_string(),
        quote: quote.to_string(),
        highlight: highlight.to_string(),
    }
}

fn project(title: &str, subtitle: &str, link: &str) -> Project {
    Project {
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        year: "2024".to_string(),
        link: link.to_string(),
    }
}

impl SiteContent {
    /// Content of the demo page
    pub fn demo() -> Self {
        let services = vec![
            service(
                "website-development",
                "Website Development",
                "Fast, responsive websites built to convert",
                &["Business Websites", "E-commerce Stores", "Landing Pages", "CMS Integration"],
            ),
            service(
                "seo",
                "Search Engine Optimization",
                "Rank higher and get found by the right customers",
                &["Technical SEO", "Local SEO", "Keyword Research"],
            ),
            service(
                "social-media-marketing",
                "Social Media Marketing",
                "Campaigns and content that grow engaged audiences",
                &["Content Calendars", "Paid Social", "Community Management"],
            ),
            service(
                "performance-marketing",
                "Performance Marketing",
                "Measurable ad spend across search and social",
                &["Google Ads", "Meta Ads", "Conversion Tracking", "A/B Testing", "Reporting"],
            ),
            service(
                "branding",
                "Branding & Design",
                "Visual identities that feel alive and consistent",
                &["Logo Design", "Brand Guidelines"],
            ),
            service(
                "app-development",
                "App Development",
                "Cross-platform mobile apps from prototype to store",
                &["Flutter Apps", "Backend APIs", "Maintenance"],
            ),
        ];

        let reviews = vec![
            review(
                "Arjun Mehta",
                "Digital Marketing Head",
                "He asked thoughtful, strategic questions that helped us clarify our message and visual identity. The result was a digital presence that feels alive, intuitive, and deeply aligned with our values.",
                "alive, intuitive, and value-aligned",
            ),
            review(
                "Priya Sharma",
                "UI/UX Lead",
                "His grasp of UI/UX principles is sophisticated, and he approaches every project with equal parts logic and imagination. What impressed me most was his ability to think like a true designer.",
                "logic and imagination in perfect balance",
            ),
            review(
                "Rajesh Patel",
                "Marketing Head",
                "He is the kind of designer every marketing team dreams of working with. He listens deeply, understands the brand voice instantly, and brings ideas to life with clarity and creativity.",
                "listens deeply and understands instantly",
            ),
        ];

        let projects = vec![
            ProjectPair {
                left: project("Shiv Gauri", "Infrastructure Services", "https://shivgauriinfra.com/"),
                right: project("Best Balloon", "Event Decoration", "https://precious-elf-6c250a.netlify.app/"),
            },
            ProjectPair {
                left: project("Hsrp Plate", "Hsrp Plate Booking", "https://bookingshsrp.com/"),
                right: project("Kuntal Agro", "Ecommerce Website", "https://www.kuntalagro.com/"),
            },
            ProjectPair {
                left: project("Best Mehndi Artist", "Professional Mehndi Artist", "https://www.bestmehndiartist.in/"),
                right: project("Venus Geyser Service", "Home Service Platform", "https://venus-geyser-service.netlify.app/"),
            },
        ];

        Self {
            services,
            reviews,
            projects,
        }
    }
}
