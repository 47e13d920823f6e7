//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::domain::user::{User, UserRepository, UserRole};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::user;

use super::{corrupt_status, db_err};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: user::Model) -> DomainResult<User> {
    Ok(User {
        id: m.id,
        company_id: m.company_id,
        role: UserRole::parse(&m.role).ok_or_else(|| corrupt_status("User", &m.role))?,
        email: m.email,
        first_name: m.first_name,
        last_name: m.last_name,
        employee_id: m.employee_id,
        is_active: m.is_active,
        created_at: m.created_at,
    })
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .filter(user::Column::CompanyId.eq(company_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn save(&self, u: User) -> DomainResult<()> {
        let model = user::ActiveModel {
            id: Set(u.id),
            company_id: Set(u.company_id),
            email: Set(u.email),
            first_name: Set(u.first_name),
            last_name: Set(u.last_name),
            role: Set(u.role.as_str().to_string()),
            employee_id: Set(u.employee_id),
            is_active: Set(u.is_active),
            created_at: Set(u.created_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}
