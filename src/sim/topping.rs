//! Toppings and topping membership sets

use serde::{Deserialize, Serialize};

/// Topping types available on the workbench
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topping {
    Sauce,
    Cheese,
    Pepperoni,
    Corn,
    Olives,
}

impl Topping {
    /// All toppings in display order
    pub const ALL: [Topping; 5] = [
        Topping::Sauce,
        Topping::Cheese,
        Topping::Pepperoni,
        Topping::Corn,
        Topping::Olives,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topping::Sauce => "sauce",
            Topping::Cheese => "cheese",
            Topping::Pepperoni => "pepperoni",
            Topping::Corn => "corn",
            Topping::Olives => "olives",
        }
    }
}

/// Boolean membership record, one flag per topping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToppingSet {
    pub sauce: bool,
    pub cheese: bool,
    pub pepperoni: bool,
    pub corn: bool,
    pub olives: bool,
}

impl ToppingSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, topping: Topping) -> bool {
        match topping {
            Topping::Sauce => self.sauce,
            Topping::Cheese => self.cheese,
            Topping::Pepperoni => self.pepperoni,
            Topping::Corn => self.corn,
            Topping::Olives => self.olives,
        }
    }

    pub fn set(&mut self, topping: Topping, present: bool) {
        let flag = match topping {
            Topping::Sauce => &mut self.sauce,
            Topping::Cheese => &mut self.cheese,
            Topping::Pepperoni => &mut self.pepperoni,
            Topping::Corn => &mut self.corn,
            Topping::Olives => &mut self.olives,
        };
        *flag = present;
    }

    pub fn insert(&mut self, topping: Topping) {
        self.set(topping, true);
    }

    /// Builder-style insert
    pub fn with(mut self, topping: Topping) -> Self {
        self.insert(topping);
        self
    }

    /// Iterate over the toppings present, in display order
    pub fn iter(&self) -> impl Iterator<Item = Topping> + '_ {
        Topping::ALL.into_iter().filter(|t| self.contains(*t))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<Topping> for ToppingSet {
    fn from_iter<I: IntoIterator<Item = Topping>>(iter: I) -> Self {
        let mut set = ToppingSet::new();
        for topping in iter {
            set.insert(topping);
        }
        set
    }
}

impl std::fmt::Display for ToppingSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "plain");
        }
        let names: Vec<&str> = self.iter().map(|t| t.as_str()).collect();
        write!(f, "{}", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_membership() {
        let set = ToppingSet::new().with(Topping::Sauce).with(Topping::Olives);
        assert!(set.contains(Topping::Sauce));
        assert!(set.contains(Topping::Olives));
        assert!(!set.contains(Topping::Cheese));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_from_iter_dedupes() {
        let set: ToppingSet = [Topping::Corn, Topping::Corn, Topping::Cheese]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.to_string(), "cheese, corn");
    }

    #[test]
    fn test_empty_display() {
        assert_eq!(ToppingSet::new().to_string(), "plain");
        assert!(ToppingSet::new().is_empty());
    }
}
