//! Built-in articles used when nothing has been persisted yet, or when the
//! persisted value cannot be read.

use super::types::Article;

fn article(id: &str, title: &str, keywords: &[&str], content: &str) -> Article {
    Article {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

pub fn default_articles() -> Vec<Article> {
    vec![
        article(
            "feat-001",
            "Quantum Drive Feature",
            &["quantum", "drive", "speed", "performance", "transfer"],
            "The Quantum Drive allows for instantaneous data transfer across vast distances. \
             It operates on principles of quantum entanglement, ensuring secure and high-speed \
             communication. It is best suited for large-scale data synchronization and real-time \
             collaboration.",
        ),
        article(
            "policy-002",
            "Return Policy",
            &["return", "refund", "policy", "purchase", "money back"],
            "Our return policy allows for full refunds within 30 days of purchase. The product \
             must be in its original condition. To initiate a return, please contact support with \
             your order number. Returns are not accepted for digitally downloaded software.",
        ),
        article(
            "setup-003",
            "Initial Setup Guide",
            &["setup", "install", "guide", "getting started", "bluetooth"],
            "To set up your device, first, connect it to a power source. Then, download the \
             companion app from the app store. Follow the on-screen instructions in the app to \
             pair your device via Bluetooth. The entire process should take less than 5 minutes.",
        ),
    ]
}
