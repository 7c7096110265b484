use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewPlateOrder, PlateOrder};
use crate::schema::plate_orders;

#[derive(Clone)]
pub struct PlateOrderRepository {
    pool: AsyncDbPool,
}

impl PlateOrderRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, order: NewPlateOrder) -> AppResult<PlateOrder> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        diesel::insert_into(plate_orders::table)
            .values(&order)
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<PlateOrder> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        plate_orders::table
            .find(id)
            .first(&mut conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::NotFound {
                    entity: "PlateOrder".to_string(),
                    field: "id".to_string(),
                    value: id.to_string(),
                },
                _ => AppError::from(e),
            })
    }

    pub async fn list(&self, offset: i64, limit: i64) -> AppResult<Vec<PlateOrder>> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        plate_orders::table
            .order(plate_orders::id.desc())
            .offset(offset)
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
