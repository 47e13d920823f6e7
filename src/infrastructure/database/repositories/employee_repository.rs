//! SeaORM implementation of EmployeeRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::domain::employee::{Employee, EmployeeRepository, EmployeeRole, EmployeeStatus};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::employee;

use super::{corrupt_status, db_err};

pub struct SeaOrmEmployeeRepository {
    db: DatabaseConnection,
}

impl SeaOrmEmployeeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: employee::Model) -> DomainResult<Employee> {
    Ok(Employee {
        id: m.id,
        company_id: m.company_id,
        role: EmployeeRole::parse(&m.role).ok_or_else(|| corrupt_status("Employee", &m.role))?,
        status: EmployeeStatus::parse(&m.status)
            .ok_or_else(|| corrupt_status("Employee", &m.status))?,
        first_name: m.first_name,
        last_name: m.last_name,
        email: m.email,
        phone: m.phone,
        hire_date: m.hire_date,
        license_number: m.license_number,
        license_expiry_date: m.license_expiry_date,
        created_at: m.created_at,
    })
}

#[async_trait]
impl EmployeeRepository for SeaOrmEmployeeRepository {
    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> DomainResult<Option<Employee>> {
        let model = employee::Entity::find_by_id(id)
            .filter(employee::Column::CompanyId.eq(company_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn save(&self, e: Employee) -> DomainResult<()> {
        let model = employee::ActiveModel {
            id: Set(e.id),
            company_id: Set(e.company_id),
            first_name: Set(e.first_name),
            last_name: Set(e.last_name),
            email: Set(e.email),
            phone: Set(e.phone),
            role: Set(e.role.as_str().to_string()),
            status: Set(e.status.as_str().to_string()),
            hire_date: Set(e.hire_date),
            license_number: Set(e.license_number),
            license_expiry_date: Set(e.license_expiry_date),
            created_at: Set(e.created_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}
