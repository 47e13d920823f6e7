//! SeaORM implementation of DiscountRepository
//!
//! `increment_usage` is a guarded conditional UPDATE so concurrent
//! redemptions cannot push `usage_count` past `usage_limit`.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::discount::{Discount, DiscountRepository, DiscountType};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::discount;

use super::{corrupt_status, db_err};

pub struct SeaOrmDiscountRepository {
    db: DatabaseConnection,
}

impl SeaOrmDiscountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: discount::Model) -> DomainResult<Discount> {
    Ok(Discount {
        id: m.id,
        company_id: m.company_id,
        discount_type: DiscountType::parse(&m.discount_type)
            .ok_or_else(|| corrupt_status("Discount", &m.discount_type))?,
        code: m.code,
        name: m.name,
        description: m.description,
        value: m.value,
        start_date: m.start_date,
        end_date: m.end_date,
        usage_limit: m.usage_limit,
        usage_count: m.usage_count,
        is_active: m.is_active,
        created_at: m.created_at,
    })
}

fn to_active(d: Discount) -> discount::ActiveModel {
    discount::ActiveModel {
        id: Set(d.id),
        company_id: Set(d.company_id),
        code: Set(d.code),
        name: Set(d.name),
        description: Set(d.description),
        discount_type: Set(d.discount_type.as_str().to_string()),
        value: Set(d.value),
        start_date: Set(d.start_date),
        end_date: Set(d.end_date),
        usage_limit: Set(d.usage_limit),
        usage_count: Set(d.usage_count),
        is_active: Set(d.is_active),
        created_at: Set(d.created_at),
    }
}

#[async_trait]
impl DiscountRepository for SeaOrmDiscountRepository {
    async fn save(&self, d: Discount) -> DomainResult<()> {
        debug!(code = %d.code, "Saving discount");
        to_active(d).insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> DomainResult<Option<Discount>> {
        let model = discount::Entity::find_by_id(id)
            .filter(discount::Column::CompanyId.eq(company_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_by_code(
        &self,
        company_id: Uuid,
        code: &str,
    ) -> DomainResult<Option<Discount>> {
        let model = discount::Entity::find()
            .filter(discount::Column::CompanyId.eq(company_id))
            .filter(discount::Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn list(&self, company_id: Uuid) -> DomainResult<Vec<Discount>> {
        let models = discount::Entity::find()
            .filter(discount::Column::CompanyId.eq(company_id))
            .order_by_desc(discount::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn update(&self, d: Discount) -> DomainResult<()> {
        let exists = discount::Entity::find_by_id(d.id)
            .filter(discount::Column::CompanyId.eq(d.company_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some();
        if !exists {
            return Err(DomainError::not_found("Discount", d.id));
        }
        to_active(d).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn increment_usage(&self, company_id: Uuid, id: Uuid) -> DomainResult<bool> {
        let result = discount::Entity::update_many()
            .col_expr(
                discount::Column::UsageCount,
                Expr::col(discount::Column::UsageCount).add(1),
            )
            .filter(discount::Column::Id.eq(id))
            .filter(discount::Column::CompanyId.eq(company_id))
            .filter(
                Condition::any()
                    .add(discount::Column::UsageLimit.is_null())
                    .add(
                        Expr::col(discount::Column::UsageCount)
                            .lt(Expr::col(discount::Column::UsageLimit)),
                    ),
            )
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
