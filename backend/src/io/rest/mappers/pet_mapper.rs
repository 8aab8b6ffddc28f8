use chrono::NaiveDate;
use shared::{CreatePetRequest, UpdatePetRequest};

use crate::domain::commands::pet::{CreatePetCommand, UpdatePetCommand};
use crate::domain::models::Pet;
use crate::io::rest::mappers::format_timestamp;

pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

pub struct PetMapper;

impl PetMapper {
    /// `today` is the reference date for the derived age
    pub fn to_dto(pet: Pet, today: NaiveDate) -> shared::Pet {
        shared::Pet {
            age_in_years: pet.age_in_years(today),
            birth_date: pet.birth_date.format(BIRTH_DATE_FORMAT).to_string(),
            species: pet.species.as_str().to_string(),
            created_at: format_timestamp(&pet.created_at),
            id: pet.id,
            name: pet.name,
            breed: pet.breed,
            owner_id: pet.owner_id,
            owner_name: pet.owner_name,
        }
    }

    pub fn to_create_command(request: CreatePetRequest) -> CreatePetCommand {
        CreatePetCommand {
            name: request.name,
            species: request.species,
            breed: request.breed,
            birth_date: request.birth_date,
            owner_id: request.owner_id,
        }
    }

    pub fn to_update_command(request: UpdatePetRequest) -> UpdatePetCommand {
        UpdatePetCommand {
            name: request.name,
            species: request.species,
            breed: request.breed,
            birth_date: request.birth_date,
            owner_id: request.owner_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::Species;

    #[test]
    fn test_to_dto_computes_age_for_given_day() {
        let pet = Pet {
            id: 1,
            name: "Max".to_string(),
            species: Species::Dog,
            breed: "Labrador".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            created_at: Utc::now(),
            owner_id: 3,
            owner_name: "Juan Pérez".to_string(),
        };

        let dto = PetMapper::to_dto(pet.clone(), NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert_eq!(dto.age_in_years, 6);
        assert_eq!(dto.birth_date, "2020-01-01");
        assert_eq!(dto.species, "Dog");

        let dto = PetMapper::to_dto(pet, NaiveDate::from_ymd_opt(2020, 12, 31).unwrap());
        assert_eq!(dto.age_in_years, 0);
    }
}
