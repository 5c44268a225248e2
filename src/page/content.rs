use crate::foundation::error::{ScrollweaveError, ScrollweaveResult};

/// Hero background image.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Slide {
    /// Image URL.
    pub src: String,
    /// Alt text.
    pub alt: String,
}

/// Hero banner copy.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HeroContent {
    /// Main heading.
    pub headline: String,
    /// Line under the heading.
    pub tagline: String,
    /// Background slideshow, shown in order.
    pub slides: Vec<Slide>,
}

/// Carousel product card.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Product {
    /// Display name.
    pub name: String,
    /// Model line.
    pub model: String,
    /// Current price.
    pub price: f64,
    /// Price before discount, shown struck through when on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    /// Category tag.
    pub category: String,
}

impl Product {
    /// Return `true` when the card carries a sale badge.
    pub fn on_sale(&self) -> bool {
        self.original_price.is_some_and(|p| p > self.price)
    }
}

/// Customer quote.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Testimonial {
    /// Customer name.
    pub name: String,
    /// Customer role.
    pub role: String,
    /// Quote.
    pub content: String,
}

/// FAQ entry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FaqEntry {
    /// Question shown on the toggle.
    pub question: String,
    /// Answer revealed when open.
    pub answer: String,
}

/// News card.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NewsItem {
    /// Headline.
    pub title: String,
    /// Display date.
    pub date: String,
    /// Teaser.
    pub description: String,
}

/// Contact details shown next to the form.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContactInfo {
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Postal address; also the static map fallback.
    pub address: String,
}

/// Navigation link.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NavLink {
    /// Link text.
    pub label: String,
    /// In-page target, e.g. `"#features"`.
    pub href: String,
}

/// Static copy for the whole landing page.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageContent {
    /// Brand name in the navigation bar.
    pub brand: String,
    /// Navigation links.
    pub nav: Vec<NavLink>,
    /// Hero banner.
    pub hero: HeroContent,
    /// Partner names.
    pub partners: Vec<String>,
    /// Feature card titles.
    pub features: Vec<String>,
    /// Carousel products.
    pub products: Vec<Product>,
    /// Call-to-action heading.
    pub cta: String,
    /// Customer quotes.
    pub testimonials: Vec<Testimonial>,
    /// FAQ entries.
    pub faqs: Vec<FaqEntry>,
    /// News cards.
    pub news: Vec<NewsItem>,
    /// Contact details.
    pub contact: ContactInfo,
}

impl PageContent {
    /// Check that every list the page cycles through is non-empty.
    pub fn validate(&self) -> ScrollweaveResult<()> {
        if self.hero.slides.is_empty() {
            return Err(ScrollweaveError::validation("hero needs at least one slide"));
        }
        if self.testimonials.is_empty() {
            return Err(ScrollweaveError::validation(
                "testimonials carousel needs at least one quote",
            ));
        }
        if let Some(link) = self.nav.iter().find(|l| !l.href.starts_with('#')) {
            return Err(ScrollweaveError::validation(format!(
                "nav link '{}' must point inside the page, got '{}'",
                link.label, link.href
            )));
        }
        Ok(())
    }

    /// Parse and validate JSON.
    pub fn from_json_str(s: &str) -> ScrollweaveResult<Self> {
        let content: Self = serde_json::from_str(s)?;
        content.validate()?;
        Ok(content)
    }
}

fn s(v: &str) -> String {
    v.to_owned()
}

fn product(name: &str, model: &str, price: f64, original: Option<f64>, cat: &str) -> Product {
    Product {
        name: s(name),
        model: s(model),
        price,
        original_price: original,
        category: s(cat),
    }
}

impl Default for PageContent {
    fn default() -> Self {
        Self {
            brand: s("SmartHome"),
            nav: ["Features", "Devices", "Testimonials", "Contact"]
                .into_iter()
                .map(|label| NavLink {
                    label: s(label),
                    href: format!("#{}", label.to_lowercase()),
                })
                .collect(),
            hero: HeroContent {
                headline: s("We create modern user experience"),
                tagline: s(
                    "We enable AI-powered IoT devices to create the perfect smart home ecosystem for your needs",
                ),
                slides: [
                    ("smart-switch.jpeg", "Smart home background"),
                    ("devices.jpeg", "Smart home devices"),
                    ("interior.jpeg", "Smart home interior"),
                    ("bedroom.jpeg", "Smart home bedroom"),
                ]
                .into_iter()
                .map(|(src, alt)| Slide {
                    src: s(src),
                    alt: s(alt),
                })
                .collect(),
            },
            partners: ["Nest", "Ring", "Philips Hue", "Samsung"]
                .into_iter()
                .map(s)
                .collect(),
            features: [
                "Innovation",
                "Best value out there",
                "Great service",
                "We target greatness",
                "Multiple awards",
                "Best product on the market",
            ]
            .into_iter()
            .map(s)
            .collect(),
            products: vec![
                product("Smart Camera Pro", "ProVision X1", 199.99, Some(249.99), "Security"),
                product("AI Thermostat", "ClimateIQ Pro", 159.99, None, "Climate"),
                product("Smart Lock", "SecureHome+", 179.99, Some(229.99), "Security"),
                product("LED Bundle", "AuroraGlow", 89.99, None, "Lighting"),
                product("Smart Speaker", "SoundHub", 129.99, Some(159.99), "Audio"),
                product("Video Doorbell", "ViewGuard", 149.99, None, "Security"),
                product("Robot Vacuum", "CleanMaster", 299.99, Some(399.99), "Appliances"),
                product("Smart Plug", "PowerControl", 29.99, None, "Power"),
                product("Security Hub", "SafeCore", 249.99, Some(299.99), "Security"),
                product("Smart Display", "ViewHub", 179.99, None, "Display"),
            ],
            cta: s("Ready to Transform Your Home?"),
            testimonials: vec![
                Testimonial {
                    name: s("Sarah Johnson"),
                    role: s("Homeowner"),
                    content: s("The smart home system has completely transformed how I live."),
                },
                Testimonial {
                    name: s("Michael Chen"),
                    role: s("Tech Enthusiast"),
                    content: s("Incredible technology and even better customer support."),
                },
                Testimonial {
                    name: s("Emily Rodriguez"),
                    role: s("Interior Designer"),
                    content: s("The design integrates beautifully with any home decor."),
                },
            ],
            faqs: vec![
                FaqEntry {
                    question: s("How does the smart home system work?"),
                    answer: s("A central hub connects and controls all your smart devices."),
                },
                FaqEntry {
                    question: s("Is it compatible with other smart devices?"),
                    answer: s("Yes, including Zigbee, Z-Wave and Wi-Fi devices."),
                },
                FaqEntry {
                    question: s("What about security and privacy?"),
                    answer: s("All communication is end-to-end encrypted."),
                },
                FaqEntry {
                    question: s("Do I need professional installation?"),
                    answer: s("No, most users finish the basic setup in under an hour."),
                },
                FaqEntry {
                    question: s("What happens if my internet goes down?"),
                    answer: s("Local automations keep working; cloud features pause."),
                },
            ],
            news: vec![
                NewsItem {
                    title: s("Smart Home Innovation"),
                    date: s("Mar 15, 2024"),
                    description: s("Latest advances in smart home technology and AI integration."),
                },
                NewsItem {
                    title: s("Security Updates"),
                    date: s("Mar 10, 2024"),
                    description: s("New security features and improvements for smart homes."),
                },
                NewsItem {
                    title: s("Energy Efficiency"),
                    date: s("Mar 5, 2024"),
                    description: s("How smart homes are reducing energy consumption."),
                },
            ],
            contact: ContactInfo {
                email: s("contact@smartcompany.com"),
                phone: s("+1 (555) 123-4567"),
                address: s("123 Smart Street, Tech City, TC 12345"),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/content.rs"]
mod tests;
