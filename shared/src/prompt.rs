//! Prompt construction for the AI gateway.
//!
//! Every template embeds the JSON structure rendered from the matching
//! descriptor in [`crate::schema`], so the shape requested from the model
//! and the shape the validator accepts always agree.

use crate::dto::{DestinationInput, PageType};
use crate::schema::{CONTENT_SCHEMA, PROFILE_SCHEMA};

/// System instruction for page-content generation.
pub fn content_system_prompt() -> &'static str {
    "Je bent een ervaren Nederlandse reisschrijver die SEO-geoptimaliseerde content schrijft \
     voor een reissite. Je schrijft altijd in het Nederlands, op een inspirerende maar \
     informatieve toon. Je content moet origineel, SEO-vriendelijk, praktisch bruikbaar en \
     accuraat zijn. Antwoord ALTIJD in valid JSON formaat."
}

/// System instruction for full-profile generation.
pub fn profile_system_prompt() -> &'static str {
    "Je bent een ervaren Nederlandse reisexpert die gedetailleerde informatie genereert over \
     reisbestemmingen. Je antwoorden zijn altijd in het Nederlands en bevatten accurate, \
     bruikbare informatie. BELANGRIJK: Antwoord ALLEEN met valid JSON, geen extra tekst of uitleg."
}

/// Instruction text for one destination page.
pub fn content_prompt(destination: &DestinationInput, page_type: PageType) -> String {
    let name = &destination.name;
    let country = &destination.country;
    let body = match page_type {
        PageType::Main => format!(
            "Genereer content voor de hoofdpagina van {name} in {country}. \
             Schrijf een uitgebreid artikel van 300-400 woorden over de bestemming, \
             inclusief cultuur, bezienswaardigheden en tips. \
             Belangrijk: {name} is een {noun}.",
            noun = category_noun(&destination.category),
        ),
        PageType::Hotels => format!(
            "Genereer content voor de hotels pagina van {name} in {country}. \
             Schrijf een artikel van 250-350 woorden over de beste wijken om te overnachten, \
             soorten accommodaties en tips voor het boeken. \
             Gebruik een titel in de stijl van \"Hotels in {name} | Beste Overnachtingen\"."
        ),
        PageType::Attractions => format!(
            "Genereer content voor de bezienswaardigheden pagina van {name} in {country}. \
             Schrijf een artikel van 400-500 woorden met een Top 10 van bezienswaardigheden; \
             beschrijf elke bezienswaardigheid kort met praktische info. \
             Gebruik een titel in de stijl van \"Top Bezienswaardigheden {name} | Must-sees\"."
        ),
        PageType::Flights => format!(
            "Genereer content voor de vliegtickets pagina van {name} in {country}. \
             De dichtstbijzijnde luchthaven is: {airport}. \
             Schrijf een artikel van 250-350 woorden over de luchthaven(s), \
             luchtvaartmaatschappijen die er vliegen, de beste tijd om te boeken en \
             tips voor goedkope tickets.",
            airport = destination.nearest_airport.as_deref().unwrap_or("onbekend"),
        ),
        PageType::Restaurants => format!(
            "Genereer content voor de restaurants pagina van {name} in {country}. \
             Schrijf een artikel van 250-350 woorden over de eetcultuur, lokale gerechten, \
             de beste buurten om uit eten te gaan en tips voor het reserveren."
        ),
    };
    format!(
        "{body}\n\nGeef JSON terug met EXACT deze structuur:\n{template}",
        template = CONTENT_SCHEMA.prompt_template(),
    )
}

/// Instruction text for full-profile generation.
pub fn profile_prompt(city: &str, country: &str, country_code: &str, category: &str) -> String {
    format!(
        "Genereer volledige informatie voor {city} in {country} als {label}. \
         De landcode is {country_code}.\n\n\
         Geef JSON terug met EXACT deze structuur:\n{template}\n\n\
         Zorg dat de coördinaten correct zijn voor {city}, {country}. \
         De slug moet lowercase zijn met streepjes in plaats van spaties.",
        label = category_label(category),
        template = PROFILE_SCHEMA.prompt_template(),
    )
}

/// Instruction text for hero-image generation.
pub fn hero_image_prompt(city: &str, country: &str, category: &str) -> String {
    format!(
        "Breathtaking professional travel photograph of {city}, {country}: {style}. \
         Golden hour lighting, 16:9 aspect ratio, high resolution, no text, no watermarks.",
        style = category_style(category),
    )
}

/// Category noun used in the main-page prompt.
fn category_noun(category: &str) -> &'static str {
    match category {
        "stedentrips" => "stad",
        "strandvakanties" => "strand bestemming",
        _ => "bestemming",
    }
}

/// Category label used in the profile prompt.
fn category_label(category: &str) -> &'static str {
    match category {
        "stedentrips" => "stedentrip",
        "strandvakanties" => "strandvakantie",
        "wintersport" => "wintersport bestemming",
        "vakantieparken" => "vakantiepark regio",
        "pretparken" => "pretpark bestemming",
        _ => "bestemming",
    }
}

/// Visual style descriptor for hero-image generation.
fn category_style(category: &str) -> &'static str {
    match category {
        "stedentrips" => {
            "vibrant city skyline with historic architecture and lively streets"
        }
        "strandvakanties" => {
            "pristine beach with turquoise water, white sand and palm trees"
        }
        "wintersport" => "snow-covered alpine ski resort with mountain peaks and pistes",
        "vakantieparken" => "lush green holiday park with cottages surrounded by forest",
        "pretparken" => "colorful theme park with spectacular rides against a blue sky",
        _ => "beautiful travel destination",
    }
}
