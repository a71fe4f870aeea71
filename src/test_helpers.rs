//! Shared test utilities for the storefront test suite.
//!
//! Provides one realistic sample document (two services, every optional
//! block present except where noted) and small builders for variations.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut content = sample_content();
//! content.pages.home.testimonials = None;
//! ```
//!
//! Deliberate gaps in the sample, so tests can exercise fallbacks:
//! - `siding` has no `features` and no `cta.buttonHref`
//! - the contact page has no `seo.keywords`

use crate::content::{Cta, PageSeo, Service, SiteContent};

/// The sample document as JSON text, exactly as an author would write it.
pub fn sample_json() -> String {
    r##"{
  "business": {
    "name": "Ridgeline Exteriors",
    "phone": "(555) 123-4567",
    "email": "hello@ridgeline.example",
    "address": "412 Oak Street, Springfield, IL 62704",
    "hours": ["Mon-Fri 8am-6pm", "Sat 9am-2pm"]
  },
  "seo": {
    "siteTitle": "Ridgeline Exteriors | Roofing & Siding",
    "siteDescription": "Roofing and siding contractor serving Springfield and nearby towns.",
    "keywords": ["roofing", "siding", "springfield"],
    "jsonLd": {
      "type": "RoofingContractor",
      "address": {
        "streetAddress": "412 Oak Street",
        "city": "Springfield",
        "state": "IL",
        "zip": "62704"
      },
      "geo": { "latitude": 39.7817, "longitude": -89.6501 },
      "openingHours": ["Mo-Fr 08:00-18:00", "Sa 09:00-14:00"],
      "aggregateRating": { "ratingValue": 4.9, "reviewCount": 127 }
    }
  },
  "design": {
    "primaryColor": "#1e3a5f",
    "accentColor": "#e07a1f"
  },
  "pages": {
    "home": {
      "seo": {
        "title": "Roofing & Siding in Springfield | Ridgeline Exteriors",
        "description": "Trusted local roofers and siding installers."
      },
      "hero": {
        "headline": "Roofs and Siding Done Right",
        "subheadline": "Protecting Springfield homes since 1998",
        "ctaPrimary": { "text": "Call for a Free Quote", "href": "tel:5551234567" },
        "ctaSecondary": { "text": "Our Services", "href": "/#services" },
        "stats": [
          { "value": "25+", "label": "Years" },
          { "value": "3,000", "label": "Roofs" },
          { "value": "4.9", "label": "Rating" }
        ]
      },
      "trustBar": [
        { "icon": "shield", "text": "Licensed & Insured" },
        { "icon": "clock", "text": "Same-Week Estimates" },
        { "icon": "award", "text": "Award-Winning Crews" }
      ],
      "servicesSummary": [
        { "slug": "roofing", "name": "Roofing", "icon": "🏠", "description": "Repairs, replacements and inspections." },
        { "slug": "siding", "name": "Siding", "icon": "🧱", "description": "Vinyl, fiber cement and wood siding." }
      ],
      "aboutPreview": {
        "headline": "A Family Business",
        "text": "Three generations of craftsmanship on every job.",
        "link": "/about/"
      },
      "testimonials": [
        { "rating": 5, "text": "Fast, tidy and on budget.", "author": "Dana K." },
        { "rating": 4, "text": "Great crew, would hire again.", "author": "Luis M." }
      ],
      "cta": {
        "headline": "Ready for a New Roof?",
        "description": "Free estimates, no pressure.",
        "buttonText": "Request an Estimate",
        "buttonHref": "/contact/"
      }
    },
    "about": {
      "seo": {
        "title": "About Us | Ridgeline Exteriors",
        "description": "Our story and what sets us apart."
      },
      "headline": "About Ridgeline Exteriors",
      "paragraphs": [
        "Family owned and operated.",
        "We treat every house like our own."
      ],
      "whyChooseUs": [
        { "icon": "🛡️", "title": "Warranty", "description": "Ten years on workmanship." },
        { "icon": "⏱️", "title": "On Time", "description": "We show up when we say." }
      ]
    },
    "contact": {
      "seo": {
        "title": "Contact | Ridgeline Exteriors",
        "description": "Call or send us a message."
      },
      "headline": "Contact Us",
      "description": "We usually reply within one business day.",
      "serviceArea": {
        "headline": "Where We Work",
        "description": "Springfield and surrounding communities.",
        "towns": ["Springfield", "Chatham", "Rochester", "Sherman"]
      }
    },
    "services": [
      {
        "slug": "roofing",
        "name": "Roofing",
        "icon": "🏠",
        "shortDescription": "Repairs, replacements and inspections.",
        "headline": "Roofs built to last",
        "description": "A roof is your home's first line of defense.\n\nWe handle asphalt, metal and flat roofs of every size.",
        "features": [
          { "title": "Full Replacement", "description": "Tear-off to final inspection." },
          { "title": "Storm Repair", "description": "Fast response after hail and wind." }
        ],
        "cta": {
          "headline": "Need a roof inspection?",
          "buttonText": "Book an Inspection",
          "buttonHref": "/contact"
        },
        "seo": {
          "title": "Roofing Services | Ridgeline Exteriors",
          "description": "Roof repair and replacement in Springfield.",
          "keywords": ["roof repair", "roof replacement"]
        }
      },
      {
        "slug": "siding",
        "name": "Siding",
        "icon": "🧱",
        "shortDescription": "Vinyl, fiber cement and wood siding.",
        "headline": "Siding that looks good for decades",
        "description": "New siding improves curb appeal and efficiency.",
        "cta": {
          "headline": "Thinking about new siding?",
          "buttonText": "Call Now"
        },
        "seo": {
          "title": "Siding Installation | Ridgeline Exteriors",
          "description": "Siding installation and repair in Springfield."
        }
      }
    ]
  }
}"##
    .to_string()
}

/// The sample document, parsed and validated.
pub fn sample_content() -> SiteContent {
    SiteContent::from_json(&sample_json()).unwrap()
}

/// A minimal service with the given slug.
pub fn service_named(slug: &str) -> Service {
    Service {
        slug: slug.to_string(),
        name: slug.to_string(),
        icon: "🔧".to_string(),
        short_description: format!("{slug} work"),
        headline: format!("{slug} headline"),
        description: format!("All about {slug}."),
        features: None,
        cta: Cta {
            headline: format!("Need {slug}?"),
            button_text: "Call".to_string(),
            button_href: None,
        },
        seo: PageSeo {
            title: format!("{slug} | Test"),
            description: format!("{slug} description"),
            keywords: None,
        },
    }
}
