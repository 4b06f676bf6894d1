//! Static launcher catalog: service cards, app shortcuts and modal content.
//!
//! Modal content is plain data. How it is drawn is the front end's business.

use roomlink_proto::AppPackage;
use serde::Serialize;

use crate::state::GuestState;

/// Subtitle shown when a modal does not define its own.
pub const DEFAULT_SUBTITLE: &str = "Radix Premium";

/// Service card identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceId {
    /// Live TV; launches the TV app instead of opening a modal.
    Tv,
    /// Cast to TV; sends the cast command instead of opening a modal.
    Cast,
    /// In-room dining.
    Dining,
    /// Wellness and spa.
    Spa,
    /// Guest assistant.
    Concierge,
    /// Hotel information.
    Info,
}

/// Service grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// TV and casting.
    Entertainment,
    /// Bookable hotel services.
    Services,
    /// Informational pages.
    Info,
}

/// A service card on the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    /// Identifier.
    pub id: ServiceId,
    /// Card title.
    pub title: &'static str,
    /// Card tagline.
    pub description: &'static str,
    /// Grouping.
    pub category: Category,
}

/// Service cards in display order.
pub const SERVICES: [Service; 6] = [
    Service {
        id: ServiceId::Tv,
        title: "Live TV",
        description: "International news & entertainment",
        category: Category::Entertainment,
    },
    Service {
        id: ServiceId::Cast,
        title: "Cast to TV",
        description: "Stream from your device",
        category: Category::Entertainment,
    },
    Service {
        id: ServiceId::Dining,
        title: "Room Service",
        description: "Exquisite culinary delights",
        category: Category::Services,
    },
    Service {
        id: ServiceId::Spa,
        title: "Wellness & Spa",
        description: "Relax and rejuvenate",
        category: Category::Services,
    },
    Service {
        id: ServiceId::Concierge,
        title: "Concierge",
        description: "Instant guest assistance",
        category: Category::Services,
    },
    Service {
        id: ServiceId::Info,
        title: "Hotel Info",
        description: "Explore the Radix Grand",
        category: Category::Info,
    },
];

/// A streaming app shortcut on the middle row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamingApp {
    /// Short identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Package launched on Select.
    pub package: AppPackage,
}

/// App shortcuts in display order.
pub const STREAMING_APPS: [StreamingApp; 4] = [
    StreamingApp { id: "netflix", name: "Netflix", package: AppPackage::Netflix },
    StreamingApp { id: "youtube", name: "YouTube", package: AppPackage::YouTube },
    StreamingApp { id: "disney", name: "Disney+", package: AppPackage::DisneyPlus },
    StreamingApp { id: "prime", name: "Prime Video", package: AppPackage::PrimeVideo },
];

/// Layout family of a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalKind {
    /// A pickable list (channels).
    Menu,
    /// A priced offering.
    Services,
    /// Read-only information.
    Info,
}

/// One entry in a modal body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalItem {
    /// Primary text.
    pub label: String,
    /// Secondary text (description or duration).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Price tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Whether the entry takes part in the modal focus ring.
    pub focusable: bool,
}

impl ModalItem {
    fn choice(label: &str) -> Self {
        Self { label: label.to_owned(), detail: None, price: None, focusable: true }
    }

    fn priced(label: &str, detail: &str, price: &str) -> Self {
        Self {
            label: label.to_owned(),
            detail: Some(detail.to_owned()),
            price: Some(price.to_owned()),
            focusable: false,
        }
    }

    fn bullet(label: &str) -> Self {
        Self { label: label.to_owned(), detail: None, price: None, focusable: false }
    }
}

/// A labelled fact such as check-out time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fact {
    /// Caption.
    pub label: String,
    /// Value.
    pub value: String,
}

/// Structured modal content for a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalContent {
    /// Service this modal describes.
    pub service: ServiceId,
    /// Heading.
    pub title: String,
    /// Overline; [`DEFAULT_SUBTITLE`] when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Layout family.
    pub kind: ModalKind,
    /// Lead paragraph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    /// Body entries.
    pub items: Vec<ModalItem>,
    /// Labelled facts.
    pub facts: Vec<Fact>,
    /// Closing small print.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footnote: Option<String>,
}

impl ModalContent {
    /// Content describing `service`, personalised for `guest` where relevant.
    pub fn for_service(service: &Service, guest: &GuestState) -> Self {
        let base = Self {
            service: service.id,
            title: String::new(),
            subtitle: None,
            kind: ModalKind::Info,
            intro: None,
            items: Vec::new(),
            facts: Vec::new(),
            footnote: None,
        };

        match service.id {
            ServiceId::Tv => Self {
                title: "Live Entertainment".into(),
                kind: ModalKind::Menu,
                items: ["Bloomberg TV", "CNN International", "ESPN HD", "Discovery Plus", "Sky News"]
                    .into_iter()
                    .map(ModalItem::choice)
                    .collect(),
                ..base
            },
            ServiceId::Dining => Self {
                title: "Signature Dining".into(),
                kind: ModalKind::Services,
                items: vec![
                    ModalItem::priced(
                        "Radix Breakfast Experience",
                        "Organic eggs, house-made pastries, seasonal fruit, premium coffee",
                        "$45",
                    ),
                    ModalItem::priced(
                        "Radix Burger",
                        "Dry-aged beef, black truffle aioli, gold leaf, brioche bun",
                        "$38",
                    ),
                    ModalItem::priced(
                        "Lobster Risotto",
                        "Fresh Maine lobster, saffron, aged parmesan, micro-greens",
                        "$52",
                    ),
                    ModalItem::priced(
                        "Perrier-Jouët Belle Époque",
                        "Champagne, France (750ml)",
                        "$290",
                    ),
                ],
                ..base
            },
            ServiceId::Spa => Self {
                title: "Wellness & Sanctuary".into(),
                kind: ModalKind::Services,
                intro: Some(
                    "Rejuvenate your senses at the Radix Sanctuary. Our treatments combine \
                     ancient wisdom with modern techniques."
                        .into(),
                ),
                items: vec![
                    ModalItem::priced("Midnight Serenity Massage", "90 min", "$220"),
                    ModalItem::priced("Radiance Glow Facial", "60 min", "$185"),
                    ModalItem::priced("Private Yoga Session", "60 min", "$120"),
                    ModalItem::priced("Hydrotherapy Ritual", "45 min", "$95"),
                ],
                ..base
            },
            ServiceId::Concierge => Self {
                title: "AI Guest Assistant".into(),
                kind: ModalKind::Services,
                intro: Some(format!(
                    "Hello {}, I am your personal Radix Assistant. How may I elevate your stay today?",
                    guest.name
                )),
                items: vec![
                    ModalItem::bullet("Instant reservations for our Michelin-starred dining"),
                    ModalItem::bullet("Curated local experiences and transport arrangements"),
                    ModalItem::bullet("Real-time housekeeping and pillow menu requests"),
                ],
                ..base
            },
            ServiceId::Info => Self {
                title: "The Radix Experience".into(),
                intro: Some(
                    "Welcome to the benchmark of modern luxury. Radix Grand stands as an \
                     architectural marvel, offering unparalleled views and world-class hospitality."
                        .into(),
                ),
                facts: vec![
                    Fact { label: "Check-out".into(), value: "12:00 PM".into() },
                    Fact { label: "Wi-Fi".into(), value: "Radix_Premium".into() },
                ],
                footnote: Some(
                    "Located in the heart of the city's financial district, featuring 248 bespoke \
                     suites, 3 signature restaurants, and an award-winning rooftop infinity pool."
                        .into(),
                ),
                ..base
            },
            ServiceId::Cast => Self {
                title: "Cast to TV".into(),
                intro: Some("Opening casting interface...".into()),
                ..base
            },
        }
    }

    /// Overline text.
    pub fn subtitle(&self) -> &str {
        self.subtitle.as_deref().unwrap_or(DEFAULT_SUBTITLE)
    }

    /// Indices into [`Self::items`] that are focusable, in order.
    pub fn focusable_items(&self) -> impl Iterator<Item = usize> + '_ {
        self.items.iter().enumerate().filter(|(_, item)| item.focusable).map(|(i, _)| i)
    }
}

/// Look up a service card by id.
pub fn service(id: ServiceId) -> Option<&'static Service> {
    SERVICES.iter().find(|s| s.id == id)
}
