//! Ticker recognition.

/// Symbols recognized in free-text queries, in reporting order.
pub const KNOWN_SYMBOLS: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "AMZN", "TSLA", "NVDA", "META", "NFLX", "SPY", "QQQ", "IWM", "VTI",
    "VEA", "VWO", "BND", "GLD",
];

/// Broad-market set used when a query names no symbol.
pub const DEFAULT_INDICES: [&str; 4] = ["SPY", "QQQ", "IWM", "DIA"];

/// Display name for an index ticker.
pub fn index_name(symbol: &str) -> Option<&'static str> {
    match symbol {
        "SPY" => Some("S&P 500"),
        "QQQ" => Some("NASDAQ"),
        "IWM" => Some("Russell 2000"),
        "DIA" => Some("Dow Jones"),
        _ => None,
    }
}

fn words(query: &str) -> impl Iterator<Item = String> + '_ {
    query
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_ascii_uppercase())
}

/// Known symbols appearing as whole words, case-insensitively, in
/// `KNOWN_SYMBOLS` order.
pub fn extract_symbols(query: &str) -> Vec<&'static str> {
    let found: Vec<String> = words(query).collect();
    KNOWN_SYMBOLS
        .iter()
        .copied()
        .filter(|s| found.iter().any(|w| w == s))
        .collect()
}

/// Number of known-symbol words in the query, counting repeats once.
pub fn symbol_hits(query: &str) -> usize {
    extract_symbols(query).len()
}
