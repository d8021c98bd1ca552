//! Output rendering for cache traces

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use recencycache::{RecencyCache, Touch};
use serde::Serialize;

/// How each step is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// `<size> - [{k1}<-->{k2}]` lines
    Text,
    /// One JSON object per line
    Json,
}

/// JSON record for one touch
#[derive(Debug, Serialize)]
struct Step<'a> {
    key: &'a str,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    evicted: Option<&'a str>,
    size: usize,
    keys: Vec<&'a str>,
}

pub struct Renderer {
    format: Format,
}

impl Renderer {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    pub fn start<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.format == Format::Text {
            writeln!(out, "START CACHE")?;
        }
        Ok(())
    }

    /// Render the cache state right after `key` was touched
    pub fn step<W: Write, V>(
        &self,
        out: &mut W,
        key: &str,
        outcome: &Touch,
        cache: &RecencyCache<V>,
    ) -> Result<()> {
        match self.format {
            Format::Text => writeln!(out, "{}", line(cache))?,
            Format::Json => {
                let step = Step {
                    key,
                    outcome: outcome.as_str(),
                    evicted: outcome.evicted(),
                    size: cache.size(),
                    keys: cache.snapshot().collect(),
                };
                serde_json::to_writer(&mut *out, &step)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }

    pub fn finish<W: Write, V>(&self, out: &mut W, cache: &RecencyCache<V>) -> Result<()> {
        if self.format == Format::Text {
            let stats = cache.stats();
            writeln!(
                out,
                "hits: {} misses: {} evictions: {}",
                stats.hits(),
                stats.misses(),
                stats.evictions()
            )?;
        }
        Ok(())
    }
}

/// `<size> - [{mru}<-->...<-->{lru}]`
pub fn line<V>(cache: &RecencyCache<V>) -> String {
    let keys: Vec<String> = cache.snapshot().map(|key| format!("{{{}}}", key)).collect();
    format!("{} - [{}]", cache.size(), keys.join("<-->"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_empty() {
        let cache = RecencyCache::new(2).unwrap();
        assert_eq!(line(&cache), "0 - []");
    }

    #[test]
    fn test_line_order() {
        let mut cache = RecencyCache::new(2).unwrap();
        cache.touch("a");
        cache.touch("b");
        cache.touch("a");

        assert_eq!(line(&cache), "2 - [{a}<-->{b}]");
    }

    #[test]
    fn test_json_step_with_eviction() {
        let mut cache = RecencyCache::new(2).unwrap();
        cache.touch("a");
        cache.touch("b");
        let outcome = cache.touch("c");

        let mut out = Vec::new();
        Renderer::new(Format::Json)
            .step(&mut out, "c", &outcome, &cache)
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["key"], "c");
        assert_eq!(value["outcome"], "evicted");
        assert_eq!(value["evicted"], "a");
        assert_eq!(value["size"], 2);
        assert_eq!(value["keys"], serde_json::json!(["c", "b"]));
    }

    #[test]
    fn test_json_step_hit_has_no_evicted_field() {
        let mut cache = RecencyCache::new(2).unwrap();
        cache.touch("a");
        let outcome = cache.touch("a");

        let mut out = Vec::new();
        let renderer = Renderer::new(Format::Json);
        renderer.start(&mut out).unwrap();
        renderer.step(&mut out, "a", &outcome, &cache).unwrap();
        renderer.finish(&mut out, &cache).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(value["outcome"], "hit");
        assert!(value.get("evicted").is_none());
    }
}
