use std::fmt;
use std::hash::{Hash, Hasher};

use rand::Rng;

const NAME_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const NAME_LEN: usize = 8;

/// A product sold by the store; one vertex of the co-purchase graph.
///
/// Two products with the same name, unit count and price are the same
/// vertex for algorithm purposes. Products are immutable once created.
#[derive(Debug, Clone)]
pub struct Product {
    name: String,
    unit: u32,
    price: f64,
}

impl Product {
    pub fn new(name: impl Into<String>, unit: u32, price: f64) -> Self {
        Product {
            name: name.into(),
            unit,
            price,
        }
    }

    /// Draws a product with a random 8-letter name, a unit count in 1..=10
    /// and an integral price in 0..=100.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let name: String = (0..NAME_LEN)
            .map(|_| NAME_ALPHABET[rng.gen_range(0..NAME_ALPHABET.len())] as char)
            .collect();
        Product {
            name,
            unit: rng.gen_range(1..=10),
            price: (rng.gen::<f64>() * 100.0).round(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> u32 {
        self.unit
    }

    pub fn price(&self) -> f64 {
        self.price
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.unit == other.unit
            && self.price.to_bits() == other.price.to_bits()
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.unit.hash(state);
        self.price.to_bits().hash(state);
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Unit: {}, Price: {}",
            self.name, self.unit, self.price
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_value_equality() {
        let a = Product::new("apple", 3, 12.0);
        let b = Product::new("apple", 3, 12.0);
        let c = Product::new("apple", 4, 12.0);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_hash_follows_equality() {
        let mut set = HashSet::new();
        set.insert(Product::new("apple", 3, 12.0));
        set.insert(Product::new("apple", 3, 12.0));
        set.insert(Product::new("pear", 3, 12.0));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_display() {
        let p = Product::new("apple", 3, 12.0);
        assert_eq!(p.to_string(), "Name: apple, Unit: 3, Price: 12");
    }

    #[test]
    fn test_random_attributes_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let p = Product::random(&mut rng);
            assert_eq!(p.name().len(), 8);
            assert!(p.name().chars().all(|c| c.is_ascii_lowercase()));
            assert!((1..=10).contains(&p.unit()));
            assert!(p.price() >= 0.0 && p.price() <= 100.0);
            assert_eq!(p.price(), p.price().round());
        }
    }
}
