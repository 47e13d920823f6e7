//! Shared fixtures for service tests against the in-memory provider.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::bus::{Bus, BusRepository, BusStatus};
use crate::domain::discount::{Discount, DiscountType};
use crate::domain::employee::{Employee, EmployeeRepository, EmployeeRole, EmployeeStatus};
use crate::domain::route::{Route, RouteRepository};
use crate::domain::trip::{Trip, TripStatus};
use crate::domain::user::{User, UserRepository, UserRole};
use crate::domain::TenantContext;
use crate::infrastructure::storage::InMemoryRepositoryProvider;

/// Ids of everything `seed_company` creates.
pub struct Fixtures {
    pub company_id: Uuid,
    pub other_company_id: Uuid,
    pub staff_user_id: Uuid,
    pub customer_user_id: Uuid,
    pub driver_id: Uuid,
    pub conductor_id: Uuid,
    pub bus_id: Uuid,
    pub maintenance_bus_id: Uuid,
    pub route_id: Uuid,
    /// Filled in by tests that seed a trip
    pub trip_id: Uuid,
}

impl Fixtures {
    pub fn staff_context(&self) -> TenantContext {
        TenantContext::new(self.company_id, self.staff_user_id, UserRole::Staff)
    }

    pub fn manager_context(&self) -> TenantContext {
        TenantContext::new(self.company_id, self.staff_user_id, UserRole::Manager)
    }

    pub fn customer_context(&self) -> TenantContext {
        TenantContext::new(self.company_id, self.customer_user_id, UserRole::Customer)
    }

    pub fn other_company_context(&self) -> TenantContext {
        TenantContext::new(self.other_company_id, Uuid::new_v4(), UserRole::Staff)
    }
}

/// Seed one company with a driver, a conductor, two buses and a route.
pub async fn seed_company(repos: &InMemoryRepositoryProvider) -> Fixtures {
    let company_id = Uuid::new_v4();
    let fixtures = Fixtures {
        company_id,
        other_company_id: Uuid::new_v4(),
        staff_user_id: Uuid::new_v4(),
        customer_user_id: Uuid::new_v4(),
        driver_id: Uuid::new_v4(),
        conductor_id: Uuid::new_v4(),
        bus_id: Uuid::new_v4(),
        maintenance_bus_id: Uuid::new_v4(),
        route_id: Uuid::new_v4(),
        trip_id: Uuid::nil(),
    };

    UserRepository::save(
        repos,
        User {
            id: fixtures.customer_user_id,
            company_id: Some(company_id),
            email: "rider@example.com".into(),
            first_name: "Riley".into(),
            last_name: "Rider".into(),
            role: UserRole::Customer,
            employee_id: None,
            is_active: true,
            created_at: Utc::now(),
        },
    )
    .await
    .unwrap();

    for (id, role, name) in [
        (fixtures.driver_id, EmployeeRole::Driver, "Dana"),
        (fixtures.conductor_id, EmployeeRole::Conductor, "Casey"),
    ] {
        EmployeeRepository::save(
            repos,
            Employee {
                id,
                company_id,
                first_name: name.into(),
                last_name: "Miles".into(),
                email: format!("{}@example.com", name.to_lowercase()),
                phone: None,
                role,
                status: EmployeeStatus::Active,
                hire_date: NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
                license_number: None,
                license_expiry_date: None,
                created_at: Utc::now(),
            },
        )
        .await
        .unwrap();
    }

    for (id, status, reg) in [
        (fixtures.bus_id, BusStatus::Active, "BUS-001"),
        (fixtures.maintenance_bus_id, BusStatus::Maintenance, "BUS-002"),
    ] {
        BusRepository::save(
            repos,
            Bus {
                id,
                company_id,
                registration_number: reg.into(),
                license_plate: format!("PL {}", reg),
                model: "Citywide 400".into(),
                manufacturer: None,
                year: 2021,
                capacity: 44,
                status,
                mileage: 12_000,
                notes: None,
                created_at: Utc::now(),
            },
        )
        .await
        .unwrap();
    }

    RouteRepository::save(
        repos,
        Route {
            id: fixtures.route_id,
            company_id,
            name: "Downtown Express".into(),
            origin: "Central Station".into(),
            destination: "Airport".into(),
            distance_km: Some(32.5),
            estimated_duration: Some(45),
            is_active: true,
            created_at: Utc::now(),
        },
    )
    .await
    .unwrap();

    fixtures
}

/// A scheduled trip on the seeded route/bus/driver.
pub fn sample_trip(f: &Fixtures, capacity: i32) -> Trip {
    Trip {
        id: Uuid::new_v4(),
        company_id: f.company_id,
        route_id: f.route_id,
        bus_id: f.bus_id,
        driver_id: f.driver_id,
        conductor_id: None,
        scheduled_departure: Utc::now() + chrono::Duration::hours(2),
        scheduled_arrival: Utc::now() + chrono::Duration::hours(5),
        status: TripStatus::Scheduled,
        capacity,
        booked_seats: 0,
        base_price: Decimal::new(3000, 2),
        actual_departure: None,
        actual_arrival: None,
        delay_reason: None,
        cancellation_reason: None,
        created_at: Utc::now(),
    }
}

/// An active percentage discount valid for the past and next 30 days.
pub fn sample_discount(
    f: &Fixtures,
    code: &str,
    percent: i32,
    usage_limit: Option<i32>,
) -> Discount {
    Discount {
        id: Uuid::new_v4(),
        company_id: f.company_id,
        code: code.into(),
        name: format!("{} percent off", percent),
        description: None,
        discount_type: DiscountType::Percentage,
        value: Decimal::from(percent),
        start_date: Utc::now() - chrono::Duration::days(30),
        end_date: Some(Utc::now() + chrono::Duration::days(30)),
        usage_limit,
        usage_count: 0,
        is_active: true,
        created_at: Utc::now(),
    }
}
