use chrono::{DateTime, Utc};

/// A clinic client. `pet_count` is computed by the store on every read.
#[derive(Debug, Clone, PartialEq)]
pub struct Owner {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub pet_count: u32,
}

impl Owner {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }

    pub fn has_pets(&self) -> bool {
        self.pet_count > 0
    }
}

/// Editable owner fields after validation
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerRecord {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

pub fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name, last_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_joins_parts() {
        let owner = Owner {
            id: 1,
            first_name: "Juan".to_string(),
            last_name: "Pérez".to_string(),
            phone: "999888777".to_string(),
            email: "juan@mail.com".to_string(),
            created_at: Utc::now(),
            pet_count: 0,
        };
        assert_eq!(owner.full_name(), "Juan Pérez");
        assert!(!owner.has_pets());
    }
}
