//! Financial tips shown at startup and on demand.

pub const TIPS: [&str; 15] = [
    "Set aside at least 10% of every income. It is the basis of financial stability.",
    "Wait 24 hours before a large purchase to avoid buying on impulse.",
    "Try the 50/30/20 rule: 50% for needs, 30% for wants, 20% for savings.",
    "Keep savings in a separate account and only touch it in a real emergency.",
    "Review your spending once a month to spot expenses you do not need.",
    "Plan large purchases ahead by putting away small amounts every month.",
    "Cashback and loyalty programs can save you up to 10%.",
    "Automate payments and savings so important transfers are never forgotten.",
    "Compare prices before buying, especially for expensive items.",
    "Build a safety cushion of three to six months of income.",
    "Investing in your education pays off best in the long run.",
    "Avoid loans for consumer goods. They often lead into a debt trap.",
    "Buy quality items. They last longer and save money over time.",
    "Plan a weekly menu to cut food costs and spontaneous purchases.",
    "Review your subscriptions regularly and cancel the ones you do not use.",
];

/// Deterministic tip selection; callers supply the seed.
pub fn pick_tip(seed: u64) -> &'static str {
    TIPS[(seed % TIPS.len() as u64) as usize]
}
