//! Static city-tier tables for Indian urban centers.
//!
//! Tier membership drives one feature of the premium model. Matching is
//! exact and case-sensitive; any city outside both tables is tier 3.

pub const TIER_1_CITIES: &[&str] = &[
    "Mumbai", "Delhi", "Bangalore", "Chennai", "Kolkata", "Hyderabad", "Pune",
];

pub const TIER_2_CITIES: &[&str] = &[
    "Jaipur", "Chandigarh", "Indore", "Lucknow", "Patna", "Ranchi",
    "Visakhapatnam", "Coimbatore", "Bhopal", "Nagpur", "Vadodara", "Surat",
    "Rajkot", "Jodhpur", "Raipur", "Amritsar", "Varanasi", "Agra", "Dehradun",
    "Mysore", "Jabalpur", "Guwahati", "Thiruvananthapuram", "Ludhiana",
    "Nashik", "Allahabad", "Udaipur", "Aurangabad", "Hubli", "Belgaum",
    "Salem", "Vijayawada", "Tiruchirappalli", "Bhavnagar", "Gwalior",
    "Dhanbad", "Bareilly", "Aligarh", "Gaya", "Kozhikode", "Warangal",
    "Kolhapur", "Bilaspur", "Jalandhar", "Noida", "Guntur", "Asansol",
    "Siliguri",
];

/// Classify a city into tiers 1 through 3. Tier 1 is checked before tier 2.
pub fn city_tier(city: &str) -> u8 {
    if TIER_1_CITIES.contains(&city) {
        1
    } else if TIER_2_CITIES.contains(&city) {
        2
    } else {
        3
    }
}
