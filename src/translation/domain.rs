/*!
 * Domain-specific terminology and formality adjustments.
 *
 * A translation can be tagged with a domain (medical, legal, ...) and a
 * formality level. Known domain terms are swapped for the target language's
 * terminology and a few formality rules are applied for Spanish and German.
 */

use anyhow::anyhow;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Terminology/style category of a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    #[default]
    General,
    Technical,
    Medical,
    Legal,
    Financial,
    Academic,
}

impl Domain {
    /// All domains in display order
    pub const ALL: [Domain; 6] = [
        Domain::General,
        Domain::Technical,
        Domain::Medical,
        Domain::Legal,
        Domain::Financial,
        Domain::Academic,
    ];

    /// Lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Technical => "technical",
            Self::Medical => "medical",
            Self::Legal => "legal",
            Self::Financial => "financial",
            Self::Academic => "academic",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Domain::ALL
            .into_iter()
            .find(|domain| domain.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| anyhow!("Invalid domain: {}", s))
    }
}

/// Style register of a translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormalityLevel {
    Formal,
    #[default]
    Neutral,
    Informal,
}

impl fmt::Display for FormalityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Formal => "formal",
            Self::Neutral => "neutral",
            Self::Informal => "informal",
        };
        f.write_str(name)
    }
}

impl FromStr for FormalityLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "formal" => Ok(Self::Formal),
            "neutral" => Ok(Self::Neutral),
            "informal" => Ok(Self::Informal),
            _ => Err(anyhow!("Invalid formality level: {}", s)),
        }
    }
}

/// Term key -> localized term, per language
type LanguageGlossary = HashMap<&'static str, HashMap<&'static str, &'static str>>;

fn glossary(entries: &[(&'static str, &[(&'static str, &'static str)])]) -> LanguageGlossary {
    entries
        .iter()
        .map(|(lang, terms)| (*lang, terms.iter().copied().collect()))
        .collect()
}

static DOMAIN_GLOSSARIES: Lazy<HashMap<Domain, LanguageGlossary>> = Lazy::new(|| {
    let mut glossaries = HashMap::new();
    glossaries.insert(Domain::General, LanguageGlossary::new());
    glossaries.insert(
        Domain::Technical,
        glossary(&[
            ("en", &[
                ("API", "Application Programming Interface"),
                ("UI", "User Interface"),
                ("database", "database"),
                ("algorithm", "algorithm"),
                ("framework", "framework"),
            ]),
            ("es", &[
                ("API", "Interfaz de Programación de Aplicaciones"),
                ("UI", "Interfaz de Usuario"),
                ("database", "base de datos"),
                ("algorithm", "algoritmo"),
                ("framework", "marco de trabajo"),
            ]),
            ("te", &[
                ("API", "అప్లికేషన్ ప్రోగ్రామింగ్ ఇంటర్ఫేస్"),
                ("UI", "యూజర్ ఇంటర్ఫేస్"),
                ("database", "డేటాబేస్"),
                ("algorithm", "అల్గారిథమ్"),
                ("framework", "ఫ్రేమ్‌వర్క్"),
            ]),
        ]),
    );
    glossaries.insert(
        Domain::Medical,
        glossary(&[
            ("en", &[
                ("diagnosis", "diagnosis"),
                ("treatment", "treatment"),
                ("symptom", "symptom"),
                ("prognosis", "prognosis"),
            ]),
            ("es", &[
                ("diagnosis", "diagnóstico"),
                ("treatment", "tratamiento"),
                ("symptom", "síntoma"),
                ("prognosis", "pronóstico"),
            ]),
            ("te", &[
                ("diagnosis", "రోగనిర్ధారణ"),
                ("treatment", "చికిత్స"),
                ("symptom", "లక్షణం"),
                ("prognosis", "వ్యాధి నిర్ణయం"),
            ]),
        ]),
    );
    glossaries.insert(
        Domain::Legal,
        glossary(&[
            ("en", &[
                ("contract", "contract"),
                ("statute", "statute"),
                ("plaintiff", "plaintiff"),
                ("defendant", "defendant"),
                ("jurisdiction", "jurisdiction"),
            ]),
            ("es", &[
                ("contract", "contrato"),
                ("statute", "estatuto"),
                ("plaintiff", "demandante"),
                ("defendant", "demandado"),
                ("jurisdiction", "jurisdicción"),
            ]),
            ("te", &[
                ("contract", "ఒప్పందం"),
                ("statute", "చట్టం"),
                ("plaintiff", "వాది"),
                ("defendant", "ప్రతివాది"),
                ("jurisdiction", "అధికారపరిధి"),
            ]),
        ]),
    );
    glossaries.insert(
        Domain::Financial,
        glossary(&[
            ("en", &[
                ("asset", "asset"),
                ("liability", "liability"),
                ("equity", "equity"),
                ("dividend", "dividend"),
                ("portfolio", "portfolio"),
            ]),
            ("es", &[
                ("asset", "activo"),
                ("liability", "pasivo"),
                ("equity", "capital"),
                ("dividend", "dividendo"),
                ("portfolio", "cartera"),
            ]),
            ("te", &[
                ("asset", "ఆస్తి"),
                ("liability", "అప్పు"),
                ("equity", "ఈక్విటీ"),
                ("dividend", "డివిడెండ్"),
                ("portfolio", "పోర్ట్‌ఫోలియో"),
            ]),
        ]),
    );
    glossaries.insert(
        Domain::Academic,
        glossary(&[
            ("en", &[
                ("thesis", "thesis"),
                ("methodology", "methodology"),
                ("analysis", "analysis"),
                ("citation", "citation"),
                ("abstract", "abstract"),
            ]),
            ("es", &[
                ("thesis", "tesis"),
                ("methodology", "metodología"),
                ("analysis", "análisis"),
                ("citation", "citación"),
                ("abstract", "resumen"),
            ]),
            ("te", &[
                ("thesis", "సిద్ధాంతం"),
                ("methodology", "పద్ధతి"),
                ("analysis", "విశ్లేషణ"),
                ("citation", "ఉల్లేఖనం"),
                ("abstract", "సారాంశం"),
            ]),
        ]),
    );
    glossaries
});

static SPANISH_TU: Lazy<Regex> = Lazy::new(|| Regex::new(r"\btú\b").expect("valid pattern"));
static SPANISH_VOSOTROS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bvosotros\b").expect("valid pattern"));
static GERMAN_SIE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bsie\b").expect("valid pattern"));

/// Options steering domain and style adjustments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainOptions {
    /// Terminology domain
    pub domain: Domain,
    /// Optional formality level
    pub formality: Option<FormalityLevel>,
    /// Caller-supplied term replacements, applied after the domain glossary
    #[serde(default)]
    pub glossary: HashMap<String, String>,
}

/// Replace every whole-word, case-insensitive occurrence of `term`
fn replace_term(text: &str, term: &str, replacement: &str) -> String {
    if term.is_empty() {
        return text.to_string();
    }
    let pattern = format!(r"(?i)\b{}\b", regex::escape(term));
    match Regex::new(&pattern) {
        Ok(re) => re.replace_all(text, NoExpand(replacement)).into_owned(),
        Err(_) => text.to_string(),
    }
}

/// Apply domain terminology, custom glossary and formality rules to a text
pub fn apply_domain_specific_translation(
    text: &str,
    source_language: &str,
    target_language: &str,
    options: &DomainOptions,
) -> String {
    let mut enhanced = text.to_string();

    if let Some(domain_glossary) = DOMAIN_GLOSSARIES.get(&options.domain) {
        if let (Some(source_terms), Some(target_terms)) = (
            domain_glossary.get(source_language),
            domain_glossary.get(target_language),
        ) {
            // Sorted for a stable replacement order
            let mut keys: Vec<&&str> = source_terms.keys().collect();
            keys.sort();
            for key in keys {
                if let (Some(source_term), Some(target_term)) =
                    (source_terms.get(*key), target_terms.get(*key))
                {
                    enhanced = replace_term(&enhanced, source_term, target_term);
                }
            }
        }
    }

    let mut custom: Vec<(&String, &String)> = options.glossary.iter().collect();
    custom.sort();
    for (term, replacement) in custom {
        enhanced = replace_term(&enhanced, term, replacement);
    }

    if options.formality == Some(FormalityLevel::Formal) {
        match target_language {
            "es" => {
                enhanced = SPANISH_TU.replace_all(&enhanced, "usted").into_owned();
                enhanced = SPANISH_VOSOTROS.replace_all(&enhanced, "ustedes").into_owned();
            }
            "de" => {
                enhanced = GERMAN_SIE.replace_all(&enhanced, "Sie").into_owned();
            }
            _ => {}
        }
    }

    enhanced
}
