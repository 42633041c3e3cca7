/*!
 * Simulated translation provider.
 *
 * There is no machine translation behind this provider. It waits a random
 * delay to mimic a network round trip and then produces a recognizable fake
 * translation: a canned phrase when one is known, a tagged placeholder for
 * non-Latin scripts, or the source text with a language suffix.
 */

use async_trait::async_trait;
use log::debug;
use once_cell::sync::Lazy;
use rand::Rng;
use std::collections::HashMap;
use std::time::Duration;

use crate::app_config::SimulationConfig;
use crate::errors::ProviderError;
use crate::providers::{Provider, ProviderRequest, ProviderResponse};

/// Canned translations for demo phrases
static DEMO_TRANSLATIONS: Lazy<HashMap<&'static str, HashMap<&'static str, &'static str>>> =
    Lazy::new(|| {
        let mut phrases = HashMap::new();
        phrases.insert(
            "Hello, world!",
            HashMap::from([
                ("es", "¡Hola, mundo!"),
                ("fr", "Bonjour, monde!"),
                ("de", "Hallo, Welt!"),
                ("it", "Ciao, mondo!"),
                ("pt", "Olá, mundo!"),
                ("ru", "Привет, мир!"),
                ("zh", "你好，世界！"),
                ("ja", "こんにちは、世界！"),
                ("ko", "안녕하세요, 세계!"),
                ("ar", "مرحبا بالعالم!"),
                ("hi", "नमस्ते, दुनिया!"),
                ("bn", "হ্যালো, বিশ্ব!"),
                ("tr", "Merhaba, dünya!"),
                ("pl", "Witaj, świecie!"),
            ]),
        );
        phrases.insert(
            "How are you today?",
            HashMap::from([
                ("es", "¿Cómo estás hoy?"),
                ("fr", "Comment allez-vous aujourd'hui?"),
                ("de", "Wie geht es dir heute?"),
                ("it", "Come stai oggi?"),
                ("pt", "Como você está hoje?"),
                ("ru", "Как дела сегодня?"),
                ("zh", "今天你好吗？"),
                ("ja", "今日の調子はどうですか？"),
                ("ko", "오늘 어떻게 지내세요?"),
                ("ar", "كيف حالك اليوم؟"),
                ("hi", "आज आप कैसे हैं?"),
                ("bn", "আপনি আজ কেমন আছেন?"),
                ("tr", "Bugün nasılsın?"),
                ("pl", "Jak się masz dzisiaj?"),
            ]),
        );
        phrases
    });

const NON_LATIN_TARGETS: &[&str] = &["zh", "ja", "ko", "ar", "hi", "bn"];

fn latin_suffix(target_language: &str) -> Option<&'static str> {
    match target_language {
        "es" => Some("(en español)"),
        "fr" => Some("(en français)"),
        "de" => Some("(auf Deutsch)"),
        "it" => Some("(in italiano)"),
        "pt" => Some("(em português)"),
        "ru" => Some("(на русском)"),
        "tr" => Some("(Türkçe olarak)"),
        "pl" => Some("(po polsku)"),
        _ => None,
    }
}

/// Produce the fake translation of a text
pub fn generate_fake_translation(text: &str, target_language: &str) -> String {
    if let Some(translation) = DEMO_TRANSLATIONS
        .get(text)
        .and_then(|targets| targets.get(target_language))
    {
        return translation.to_string();
    }

    if NON_LATIN_TARGETS.contains(&target_language) {
        return format!(
            "[{}] {} (Translation would appear here in {})",
            target_language.to_uppercase(),
            text,
            target_language
        );
    }

    match latin_suffix(target_language) {
        Some(suffix) => format!("{} {}", text, suffix),
        None => text.to_string(),
    }
}

/// Demo provider with simulated latency
#[derive(Debug, Clone)]
pub struct SimulatedProvider {
    min_delay_ms: u64,
    max_delay_ms: u64,
}

impl SimulatedProvider {
    /// Create a provider waiting between `min_delay_ms` and `max_delay_ms` per request
    pub fn new(min_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            min_delay_ms: min_delay_ms.min(max_delay_ms),
            max_delay_ms: max_delay_ms.max(min_delay_ms),
        }
    }

    /// Create a provider from the simulation settings
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.min_delay_ms, config.max_delay_ms)
    }
}

impl Default for SimulatedProvider {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

#[async_trait]
impl Provider for SimulatedProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let (delay_ms, confidence) = {
            let mut rng = rand::rng();
            (
                rng.random_range(self.min_delay_ms..=self.max_delay_ms),
                rng.random_range(0.85..=0.99),
            )
        };

        debug!(
            "Simulating {}ms translation ({} -> {})",
            delay_ms, request.source_language, request.target_language
        );
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        Ok(ProviderResponse {
            text: generate_fake_translation(&request.text, &request.target_language),
            confidence,
        })
    }

    fn name(&self) -> &str {
        "simulated"
    }
}
