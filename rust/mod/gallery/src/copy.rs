//! Built-in category copy used until an admin writes their own.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCopy {
    pub name: &'static str,
    pub tagline: &'static str,
    pub description: &'static str,
}

pub const FALLBACK_TAGLINE: &str = "Captured with Passion";
pub const FALLBACK_DESCRIPTION: &str = "Every moment has its own magic. We bring our artistic vision and technical expertise to create stunning photographs that tell your unique story.";

/// Name-keyed copy lookup.
#[derive(Debug, Clone, Copy)]
pub struct CopyTable {
    entries: &'static [CategoryCopy],
}

impl CopyTable {
    pub const fn new(entries: &'static [CategoryCopy]) -> Self {
        Self { entries }
    }

    /// Copy shown on the public gallery.
    pub const fn gallery() -> Self {
        Self::new(GALLERY)
    }

    /// Copy written into stored categories by the migration.
    pub const fn migration() -> Self {
        Self::new(MIGRATION)
    }

    pub fn entries(&self) -> &'static [CategoryCopy] {
        self.entries
    }

    /// Exact match on the trimmed name.
    pub fn exact(&self, name: &str) -> Option<&'static CategoryCopy> {
        let name = name.trim();
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn case_insensitive(&self, name: &str) -> Option<&'static CategoryCopy> {
        let name = name.trim().to_lowercase();
        self.entries.iter().find(|e| e.name.to_lowercase() == name)
    }
}

const GALLERY: &[CategoryCopy] = &[
    CategoryCopy {
        name: "Wedding",
        tagline: "Where Love Meets Lens",
        description: "Every wedding tells a unique story of love, tradition, and celebration. We capture the stolen glances, the joyful tears, and the moments that become cherished memories for generations.",
    },
    CategoryCopy {
        name: "Birthday",
        tagline: "Celebrating Life's Milestones",
        description: "From the first candle to the hundredth, birthdays are magical moments of joy. We freeze these celebrations in time, capturing the laughter, surprises, and pure happiness.",
    },
    CategoryCopy {
        name: "Corporate",
        tagline: "Professional Excellence Captured",
        description: "Elevate your brand with stunning corporate imagery. From conferences to team portraits, we deliver polished visuals that speak volumes about your professional identity.",
    },
    CategoryCopy {
        name: "Maternity",
        tagline: "The Beauty of Becoming",
        description: "Pregnancy is a journey of transformation and wonder. Our maternity shoots celebrate the glow of motherhood with elegant, intimate portraits you'll treasure forever.",
    },
    CategoryCopy {
        name: "Pre-Wedding",
        tagline: "Your Love Story Begins",
        description: "Before the vows, there's a beautiful story waiting to be told. Our pre-wedding shoots capture the romance, chemistry, and anticipation of your journey together.",
    },
    CategoryCopy {
        name: "Portrait",
        tagline: "Your Story, Beautifully Told",
        description: "Every face has a story. Our portrait sessions reveal character, emotion, and personality through carefully crafted images that reflect who you truly are.",
    },
    CategoryCopy {
        name: "Event",
        tagline: "Moments Worth Remembering",
        description: "From intimate gatherings to grand celebrations, we document events with an eye for candid moments and the energy that makes each occasion special.",
    },
    CategoryCopy {
        name: "Baby",
        tagline: "Tiny Moments, Big Memories",
        description: "Those precious early days pass so quickly. We capture the tender moments, tiny details, and pure innocence of your little one's first chapter.",
    },
];

const MIGRATION: &[CategoryCopy] = &[
    CategoryCopy {
        name: "Wedding",
        tagline: "Capture your special day with timeless elegance",
        description: "From intimate ceremonies to grand celebrations, we preserve every precious moment. Every wedding tells a unique story of love, tradition, and celebration. We capture the stolen glances, the joyful tears, and the moments that become cherished memories for generations.",
    },
    CategoryCopy {
        name: "Birthday",
        tagline: "Make every birthday unforgettable",
        description: "From the first candle to the hundredth, birthdays are magical moments of joy. We freeze these celebrations in time, capturing the laughter, surprises, and pure happiness.",
    },
    CategoryCopy {
        name: "Corporate",
        tagline: "Professional excellence captured",
        description: "Documentation of conferences, seminars, and business gatherings. Elevate your brand with stunning corporate imagery. From conferences to team portraits, we deliver polished visuals that speak volumes about your professional identity.",
    },
    CategoryCopy {
        name: "Maternity",
        tagline: "Celebrate the beauty of motherhood",
        description: "Pregnancy is a journey of transformation and wonder. Our maternity shoots celebrate the glow of motherhood with elegant, intimate portraits you'll treasure forever.",
    },
    CategoryCopy {
        name: "Pre-Wedding",
        tagline: "Tell your love story before the big day",
        description: "Before the vows, there's a beautiful story waiting to be told. Romantic, cinematic pre-wedding sessions at breathtaking locations capturing the romance, chemistry, and anticipation of your journey together.",
    },
    CategoryCopy {
        name: "Portrait",
        tagline: "Express yourself through stunning portraits",
        description: "Every face has a story. Professional headshots, lifestyle shots, or creative concepts that reveal character, emotion, and personality through carefully crafted images.",
    },
    CategoryCopy {
        name: "Event",
        tagline: "Moments Worth Remembering",
        description: "From festivals to private parties, we capture the energy, emotion, and excitement of your special events. We document events with an eye for candid moments and the energy that makes each occasion special.",
    },
    CategoryCopy {
        name: "Baby",
        tagline: "Tiny Moments, Big Memories",
        description: "Document the sacred moments of welcoming your little one with grace. Those precious early days pass so quickly. We capture the tender moments, tiny details, and pure innocence of your little one's first chapter.",
    },
    CategoryCopy {
        name: "Family",
        tagline: "Creating lasting memories",
        description: "Create beautiful family portraits that capture the love and connection you share. We freeze these precious moments in time for you to cherish forever.",
    },
    CategoryCopy {
        name: "Fashion",
        tagline: "Style and Personality",
        description: "Build your modeling portfolio with high-fashion editorial shoots that showcase your unique style and personality.",
    },
    CategoryCopy {
        name: "Product",
        tagline: "Showcase your brand",
        description: "Showcase your products with stunning commercial photography that drives sales and elevates your brand aesthetic.",
    },
    CategoryCopy {
        name: "Engagement",
        tagline: "The beginning of forever",
        description: "Celebrate your commitment with romantic engagement photography that marks the beginning of your journey together.",
    },
    CategoryCopy {
        name: "Portraits",
        tagline: "Express yourself through stunning portraits",
        description: "Every face has a story. Professional headshots, lifestyle shots, or creative concepts that reveal character, emotion, and personality through carefully crafted images.",
    },
    CategoryCopy {
        name: "Artistic Edits",
        tagline: "Transform moments into art",
        description: "Creative post-processing and artistic edits that turn your photographs into stunning visual masterpieces. From subtle enhancements to bold artistic statements.",
    },
    CategoryCopy {
        name: "Makeover Potraits",
        tagline: "Reveal your best self",
        description: "Professional makeover portraits that capture your transformation. Celebrate your beauty with expertly styled and photographed portraits that showcase your confidence and elegance.",
    },
];
