//! Pure constructors turning one news source into a `NewsItem`.

use market_rules::{
    fixed, signed_percent, whole_percent, ActiveWhale, Catalog, GameState, MarketEvent, NewsItem,
    NewsTopic,
};

const GENERAL_MARKET: &str = "general market";
const BROADER_MARKET: &str = "the broader market";
const UNKNOWN_WHALE_DESCRIPTION: &str = "An unidentified desk is moving serious size.";

/// News for a market event. id: `event:<eventId>`.
pub fn event_news(state: &GameState, event: &MarketEvent) -> NewsItem {
    let sector = event.sector_affinity.as_deref().unwrap_or(GENERAL_MARKET);
    let scope = event
        .target_ticker
        .as_deref()
        .and_then(|ticker| state.company(ticker))
        .map(|company| company.label())
        .unwrap_or_else(|| sector.to_string());

    NewsItem::new(
        NewsTopic::Event,
        &event.id,
        state.day,
        format!("{} event rattles {}", event.rarity.title(), sector),
    )
    .with_lines([
        event.description.clone(),
        format!("Scope: {}", scope),
        format!("Estimated impact: {}", signed_percent(event.impact)),
    ])
}

/// What a whale is aiming at: company, then sector, then the whole market.
pub fn whale_target_label(state: &GameState, whale: &ActiveWhale) -> String {
    if let Some(company) = whale
        .target_ticker
        .as_deref()
        .and_then(|ticker| state.company(ticker))
    {
        return company.label();
    }
    match whale.target_sector.as_deref() {
        Some(sector) if !sector.is_empty() => sector.to_string(),
        _ => BROADER_MARKET.to_string(),
    }
}

/// News for a whale that acted today. id: `whale:<whaleId>:<day>`.
pub fn whale_news(catalog: &Catalog, state: &GameState, whale: &ActiveWhale) -> NewsItem {
    let profile = catalog.find_whale_profile(&whale.profile_id);
    let target = whale_target_label(state, whale);

    let headline = match profile {
        Some(profile) => format!("{} prowls {}", profile.name, target),
        None => format!("Unidentified whale {} influences {}", whale.id, target),
    };

    let description = profile
        .map(|p| p.description.clone())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| UNKNOWN_WHALE_DESCRIPTION.to_string());
    let obsession = profile
        .map(|p| p.primary_obsession.trim())
        .filter(|o| !o.is_empty())
        .map(|o| format!("Known obsession: {}", o))
        .unwrap_or_default();

    NewsItem::new(
        NewsTopic::Whale,
        format!("{}:{}", whale.id, state.day),
        state.day,
        headline,
    )
    .with_lines([description, format!("Positioning around {}", target), obsession])
}

/// News for the current era.
///
/// A forced mutation with a message reports the message itself
/// (id `era:mutation:<message>`); otherwise a regular shift
/// (id `era:<eraId>:<day>`).
pub fn era_news(catalog: &Catalog, state: &GameState) -> NewsItem {
    let era = catalog.current_era(state);

    let (discriminator, headline) = match state.era.mutation() {
        Some(message) => (format!("mutation:{}", message), message.to_string()),
        None => (
            format!("{}:{}", era.id, state.day),
            format!("Era shifts to {}", era.name),
        ),
    };

    let confidence = whole_percent(state.era.forecast_confidence);
    let forecast = match state.era.predicted_next_era_id.as_deref() {
        Some(next) if !next.is_empty() => {
            format!("Forecast: {} ({}% confidence)", next, confidence)
        }
        _ => format!("Forecast confidence: {}%", confidence),
    };

    NewsItem::new(NewsTopic::Era, discriminator, state.day, headline).with_lines([
        era.description.clone(),
        format!("Volatility: {}x", fixed(era.effects.volatility(), 2)),
        forecast,
    ])
}
