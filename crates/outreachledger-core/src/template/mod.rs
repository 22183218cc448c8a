//! Message rendering: greeting, variant selection, HTML body.

/// Local-part prefixes that mark a shared role account rather than a
/// person.
pub const ROLE_ACCOUNT_PREFIXES: &[&str] = &["tips", "editor", "newsroom", "press", "hello"];

/// Signature used when the signature asset file is unavailable.
pub const FALLBACK_SIGNATURE: &str = "<p>Media Relations</p>";

const TRAVEL_KEYWORDS: &[&str] = &["travel", "tourism", "airline", "hotel", "cruise", "flight"];
const BUSINESS_KEYWORDS: &[&str] = &["business", "finance", "startup", "venture", "market"];

/// Salutation for a contact.
///
/// Role accounts and unnamed contacts get a group salutation; everyone
/// else is greeted by the first token of their name, with any trailing
/// comma stripped and capitalization preserved.
#[must_use]
pub fn greeting(name: &str, email: &str) -> String {
    let email = email.trim().to_lowercase();
    let local = email.split('@').next().unwrap_or_default();
    if ROLE_ACCOUNT_PREFIXES
        .iter()
        .any(|prefix| local.starts_with(prefix))
    {
        return "Hi Team,".to_string();
    }

    let name = name.trim();
    if name.is_empty() || name.eq_ignore_ascii_case("unknown") {
        return "Hi Team,".to_string();
    }

    let first = name
        .split_whitespace()
        .next()
        .unwrap_or(name)
        .trim_end_matches(',');
    format!("Hi {first},")
}

/// Message variant chosen by beat classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Travel and tourism coverage.
    Travel,
    /// Business and finance coverage.
    Business,
    /// Technology coverage. The default beat.
    #[default]
    Tech,
}

impl Variant {
    /// Classifies a contact by keyword match over company and email.
    ///
    /// Travel keywords are checked first, then business; first match
    /// wins, everything else is tech. Total and deterministic.
    #[must_use]
    pub fn pick(company: &str, email: &str) -> Self {
        let haystack = format!("{company} {email}").to_lowercase();
        if TRAVEL_KEYWORDS.iter().any(|k| haystack.contains(k)) {
            Self::Travel
        } else if BUSINESS_KEYWORDS.iter().any(|k| haystack.contains(k)) {
            Self::Business
        } else {
            Self::Tech
        }
    }

    /// Variant name as used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Travel => "travel",
            Self::Business => "business",
            Self::Tech => "tech",
        }
    }

    /// The variant-specific pitch paragraph.
    ///
    /// The pitches are data; the surrounding scaffold lives in
    /// [`build_body`] once.
    #[must_use]
    pub const fn pitch(self) -> &'static str {
        match self {
            Self::Travel => {
                "<p>When we launched a chat-first travel booking experience, travellers were \
                 happy to chat but the overwhelming majority dropped off before completing a \
                 booking. Moving intent capture into a familiar search-and-book flow reversed \
                 that, and we think the before-and-after is a strong fit for your travel \
                 coverage.</p>"
            }
            Self::Business => {
                "<p>We made a deliberate commercial bet: cut the conversational interface out \
                 of the purchase path and let the numbers speak. Conversion multiplied while \
                 cost per transaction fell, a counterpoint to where most of the market is \
                 investing right now that we think fits your business coverage.</p>"
            }
            Self::Tech => {
                "<p>We found that an LLM chat interface was the wrong tool for the final mile \
                 of a transaction: capturing intent up front and handing users to a \
                 conventional flow reduced token burn and multiplied conversions. The \
                 architecture change is simple to explain and challenges the current product \
                 trend, which we think fits your coverage.</p>"
            }
        }
    }
}

/// Renders the outreach body: greeting above, signature verbatim below,
/// variant pitch in the middle.
#[must_use]
pub fn build_body(greeting: &str, signature_html: &str, variant: Variant) -> String {
    format!(
        "<p>{greeting}</p>\n\n\
         <p>Thought this might be relevant to your coverage: a contrarian conversion story \
         from a product that walked back its AI-first interface.</p>\n\n\
         {pitch}\n\n\
         <p>Open to sharing a concise before-and-after breakdown and the exact product \
         changes we made. Happy to jump on a quick 15-minute call this week.</p>\n\n\
         <p>Kind regards,</p>\n\n\
         <br/><br/>{signature_html}",
        pitch = variant.pitch(),
    )
}
