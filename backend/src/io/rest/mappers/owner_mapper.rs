use shared::{CreateOwnerRequest, UpdateOwnerRequest};

use crate::domain::commands::owner::{CreateOwnerCommand, UpdateOwnerCommand};
use crate::domain::models::Owner;
use crate::io::rest::mappers::format_timestamp;

pub struct OwnerMapper;

impl OwnerMapper {
    pub fn to_dto(owner: Owner) -> shared::Owner {
        shared::Owner {
            full_name: owner.full_name(),
            created_at: format_timestamp(&owner.created_at),
            id: owner.id,
            first_name: owner.first_name,
            last_name: owner.last_name,
            phone: owner.phone,
            email: owner.email,
            pet_count: owner.pet_count,
        }
    }

    pub fn to_create_command(request: CreateOwnerRequest) -> CreateOwnerCommand {
        CreateOwnerCommand {
            first_name: request.first_name,
            last_name: request.last_name,
            phone: request.phone,
            email: request.email,
        }
    }

    pub fn to_update_command(request: UpdateOwnerRequest) -> UpdateOwnerCommand {
        UpdateOwnerCommand {
            first_name: request.first_name,
            last_name: request.last_name,
            phone: request.phone,
            email: request.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_to_dto_derives_full_name() {
        let owner = Owner {
            id: 4,
            first_name: "Juan".to_string(),
            last_name: "Pérez".to_string(),
            phone: "999888777".to_string(),
            email: "juan@mail.com".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap(),
            pet_count: 2,
        };

        let dto = OwnerMapper::to_dto(owner);
        assert_eq!(dto.full_name, "Juan Pérez");
        assert_eq!(dto.created_at, "2026-10-19T08:30:00Z");
        assert_eq!(dto.pet_count, 2);
    }
}
