/*!
 * Tests for the translation memory
 */

use chrono::Duration;
use lingomem::clock::Clock;
use lingomem::translation::{Domain, TranslationMemory, TranslationMemoryEntry};

use crate::common::manual_clock;

fn entry(text: &str, translation: &str) -> TranslationMemoryEntry {
    TranslationMemoryEntry::new(text, "en", "es", translation)
}

#[test]
fn test_find_afterAdd_shouldReturnEntryStampedAtOrAfterInsert() {
    let memory = TranslationMemory::new(10);
    let before = chrono::Utc::now();
    memory.add(entry("Hello", "Hola"));

    let found = memory.find("Hello", "en", "es", None).expect("entry should be found");
    assert_eq!(found.target_text, "Hola");
    assert!(found.last_used >= before);
}

#[test]
fn test_find_withHit_shouldRefreshLastUsed() {
    let (clock, shared) = manual_clock();
    let memory = TranslationMemory::with_clock(10, shared);
    memory.add(entry("Hello", "Hola"));
    let inserted_at = memory.entries()[0].last_used;

    clock.advance(Duration::seconds(30));
    let found = memory.find("Hello", "en", "es", None).unwrap();

    assert_eq!(found.last_used, inserted_at + Duration::seconds(30));
    assert_eq!(memory.entries()[0].last_used, found.last_used);
}

#[test]
fn test_find_withDifferentLanguagePair_shouldMiss() {
    let memory = TranslationMemory::new(10);
    memory.add(entry("Hello", "Hola"));

    assert!(memory.find("Hello", "en", "fr", None).is_none());
    assert!(memory.find("Hello", "de", "es", None).is_none());
    assert!(memory.find("hello", "en", "es", None).is_none());
}

#[test]
fn test_find_withDomainFilter_shouldOnlyRejectDifferentStoredDomain() {
    let memory = TranslationMemory::new(10);
    memory.add(entry("dose", "dosis").with_domain(Some(Domain::Medical)));
    memory.add(entry("contract", "contrato"));

    assert!(memory.find("dose", "en", "es", Some(Domain::Legal)).is_none());
    assert!(memory.find("dose", "en", "es", Some(Domain::Medical)).is_some());
    assert!(memory.find("dose", "en", "es", None).is_some());
    // Untagged entries match any requested domain
    assert!(memory.find("contract", "en", "es", Some(Domain::Legal)).is_some());
}

#[test]
fn test_add_withSameKey_shouldUpdateInPlace() {
    let memory = TranslationMemory::new(10);
    memory.add(entry("Hello", "Hola"));
    memory.add(entry("Bye", "Adiós"));
    memory.add(entry("Hello", "Buenas"));

    assert_eq!(memory.len(), 2);
    assert_eq!(memory.find("Hello", "en", "es", None).unwrap().target_text, "Buenas");
}

#[test]
fn test_add_overCapacity_shouldKeepMostRecentThousand() {
    let (clock, shared) = manual_clock();
    let memory = TranslationMemory::with_clock(1000, shared);

    for i in 0..1005 {
        memory.add(entry(&format!("text {}", i), &format!("texto {}", i)));
        clock.advance(Duration::milliseconds(1));
    }

    assert_eq!(memory.len(), 1000);
    for i in 0..5 {
        assert!(memory.find(&format!("text {}", i), "en", "es", None).is_none());
    }
    assert!(memory.find("text 5", "en", "es", None).is_some());
    assert!(memory.find("text 1004", "en", "es", None).is_some());
}

#[test]
fn test_add_overCapacity_shouldEvictLeastRecentlyUsed() {
    let (clock, shared) = manual_clock();
    let memory = TranslationMemory::with_clock(3, shared);

    memory.add(entry("a", "A"));
    clock.advance(Duration::seconds(1));
    memory.add(entry("b", "B"));
    clock.advance(Duration::seconds(1));
    memory.add(entry("c", "C"));
    clock.advance(Duration::seconds(1));

    // Reading "a" makes "b" the least recently used
    assert!(memory.find("a", "en", "es", None).is_some());
    clock.advance(Duration::seconds(1));
    memory.add(entry("d", "D"));

    assert_eq!(memory.len(), 3);
    assert!(memory.find("b", "en", "es", None).is_none());
    assert!(memory.find("a", "en", "es", None).is_some());
    assert!(memory.find("d", "en", "es", None).is_some());
}

#[test]
fn test_clearOlderThan_shouldDropStaleEntriesOnly() {
    let (clock, shared) = manual_clock();
    let memory = TranslationMemory::with_clock(10, shared);

    memory.add(entry("old", "viejo"));
    clock.advance(Duration::hours(2));
    memory.add(entry("new", "nuevo"));

    memory.clear_older_than(clock.now() - Duration::hours(1));

    assert_eq!(memory.len(), 1);
    assert_eq!(memory.entries()[0].source_text, "new");
}

#[test]
fn test_entriesForLanguagePair_shouldFilterByPair() {
    let memory = TranslationMemory::new(10);
    memory.add(entry("Hello", "Hola"));
    memory.add(TranslationMemoryEntry::new("Hello", "en", "fr", "Bonjour"));
    memory.add(entry("Bye", "Adiós"));

    let pairs = memory.entries_for_language_pair("en", "es");
    assert_eq!(pairs.len(), 2);
    assert!(pairs.iter().all(|e| e.target_language == "es"));
}

#[test]
fn test_stats_shouldCountHitsAndMisses() {
    let memory = TranslationMemory::new(10);
    memory.add(entry("Hello", "Hola"));

    memory.find("Hello", "en", "es", None);
    memory.find("Hello", "en", "es", None);
    memory.find("Missing", "en", "es", None);

    let (hits, misses, rate) = memory.stats();
    assert_eq!(hits, 2);
    assert_eq!(misses, 1);
    assert!((rate - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_clear_shouldEmptyMemoryAndResetStats() {
    let memory = TranslationMemory::new(10);
    memory.add(entry("Hello", "Hola"));
    memory.find("Hello", "en", "es", None);

    memory.clear();

    assert!(memory.is_empty());
    assert_eq!(memory.stats(), (0, 0, 0.0));
}

#[test]
fn test_clone_shouldShareStorage() {
    let memory = TranslationMemory::new(10);
    let other = memory.clone();
    other.add(entry("Hello", "Hola"));

    assert_eq!(memory.len(), 1);
}
