//! Curated name material for the demo fleet generator.
//!
//! Businesses get plausible Kenyan trading names assembled from curated
//! lists; counties and banks come from fixed tables. All selection is
//! deterministic through the caller's seeded RNG stream.

use crate::rng::DemoRng;

pub fn business_name(rng: &mut DemoRng) -> String {
    let lead = rng.pick(LEADS);
    let trade = rng.pick(TRADES);
    if rng.chance(0.4) {
        let suffix = rng.pick(SUFFIXES);
        format!("{lead} {trade} {suffix}")
    } else {
        format!("{lead} {trade}")
    }
}

pub fn county(rng: &mut DemoRng) -> &'static str {
    *rng.pick(COUNTIES)
}

pub fn bank(rng: &mut DemoRng) -> &'static str {
    *rng.pick(BANKS)
}

const LEADS: &[&str] = &[
    "Mama Njeri", "Tumaini", "Jambo", "Kilimani", "Baraka", "Upendo", "Safari", "Amani",
    "Wananchi", "Jua Kali", "Nyota", "Maisha", "Furaha", "Imara", "Taifa", "Ushindi",
    "Malaika", "Pwani", "Milima", "Uhuru", "Neema", "Riziki", "Bidii", "Harambee",
];

const TRADES: &[&str] = &[
    "Groceries", "Electronics", "Hardware", "Butchery", "Salon", "Chemist", "Boutique",
    "Cyber", "Bookshop", "Motors", "Agrovet", "Bakery", "Hotel", "Dairy", "Fashions",
    "Mini Mart", "Wines & Spirits", "Mobile Accessories", "Auto Spares", "Tailors",
];

const SUFFIXES: &[&str] = &[
    "Enterprises", "Traders", "Stores", "Ventures", "Supplies", "Ltd", "& Sons", "Centre",
];

const COUNTIES: &[&str] = &[
    "Nairobi", "Mombasa", "Kisumu", "Nakuru", "Kiambu", "Machakos", "Uasin Gishu",
    "Kakamega", "Nyeri", "Meru", "Kilifi", "Bungoma", "Kericho", "Kisii", "Garissa",
];

const BANKS: &[&str] = &[
    "Equity Bank", "KCB", "Co-operative Bank", "Absa Kenya", "NCBA", "Stanbic",
    "DTB", "Family Bank", "I&M Bank",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::StreamSlot;

    #[test]
    fn names_are_deterministic_per_seed() {
        let mut a = DemoRng::for_stream(7, StreamSlot::Merchants);
        let mut b = DemoRng::for_stream(7, StreamSlot::Merchants);
        for _ in 0..20 {
            assert_eq!(business_name(&mut a), business_name(&mut b));
        }
    }
}
