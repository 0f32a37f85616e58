use super::domain::{MaintenanceRecommendation, MaintenanceType, Product, ProductType};
use std::sync::OnceLock;

/// Read-only table of manufacturer maintenance recommendations.
#[derive(Debug)]
pub struct MaintenanceCatalog {
    recommendations: Vec<MaintenanceRecommendation>,
}

impl MaintenanceCatalog {
    /// Process-wide catalog, built on first use and never mutated afterwards.
    pub fn standard() -> &'static Self {
        static CATALOG: OnceLock<MaintenanceCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| Self {
            recommendations: standard_recommendations(),
        })
    }

    pub fn from_recommendations(recommendations: Vec<MaintenanceRecommendation>) -> Self {
        Self { recommendations }
    }

    pub fn recommendations(&self) -> &[MaintenanceRecommendation] {
        &self.recommendations
    }

    /// Entries for one product type in catalog order.
    pub fn for_product_type(&self, product_type: ProductType) -> Vec<&MaintenanceRecommendation> {
        self.recommendations
            .iter()
            .filter(|rec| rec.product_type == product_type)
            .collect()
    }

    pub fn routine_for(&self, product_type: ProductType) -> Option<&MaintenanceRecommendation> {
        self.recommendations.iter().find(|rec| {
            rec.product_type == product_type && rec.maintenance_type == MaintenanceType::Routine
        })
    }
}

pub fn recommendations_for_product(product: &Product) -> Vec<&'static MaintenanceRecommendation> {
    MaintenanceCatalog::standard().for_product_type(product.product_type)
}

fn standard_recommendations() -> Vec<MaintenanceRecommendation> {
    use MaintenanceType::{Initial, LongTerm, Routine, Special};
    use ProductType::{
        HomeStandbyGenerator, InverterGenerator, PortableGenerator, PressureWasher,
        WaterTrashPump,
    };

    vec![
        MaintenanceRecommendation {
            id: "rec-1",
            product_type: HomeStandbyGenerator,
            maintenance_type: Initial,
            description: "First oil & filter change",
            hours_interval: Some(25),
            months_interval: None,
            interval_description: "First ~25 hours",
        },
        MaintenanceRecommendation {
            id: "rec-2",
            product_type: HomeStandbyGenerator,
            maintenance_type: Routine,
            description: "Oil & filter change",
            hours_interval: Some(200),
            months_interval: Some(24),
            interval_description: "Every 200 hours or 2 years",
        },
        MaintenanceRecommendation {
            id: "rec-3",
            product_type: HomeStandbyGenerator,
            maintenance_type: LongTerm,
            description: "Full tune-up (spark plug, air filter, valve check)",
            hours_interval: Some(400),
            months_interval: None,
            interval_description: "Every 400 hours",
        },
        MaintenanceRecommendation {
            id: "rec-4",
            product_type: HomeStandbyGenerator,
            maintenance_type: Special,
            description: "Keep vents clear; check battery condition periodically",
            hours_interval: None,
            months_interval: None,
            interval_description: "Periodically",
        },
        MaintenanceRecommendation {
            id: "rec-5",
            product_type: PortableGenerator,
            maintenance_type: Initial,
            description: "First oil change",
            hours_interval: Some(25),
            months_interval: None,
            interval_description: "First ~20-30 hours",
        },
        MaintenanceRecommendation {
            id: "rec-6",
            product_type: PortableGenerator,
            maintenance_type: Routine,
            description: "Oil change",
            hours_interval: Some(100),
            months_interval: Some(12),
            interval_description: "Every 100 hours or annually",
        },
        MaintenanceRecommendation {
            id: "rec-7",
            product_type: PortableGenerator,
            maintenance_type: LongTerm,
            description: "Spark plug & air filter replacement",
            hours_interval: Some(200),
            months_interval: Some(12),
            interval_description: "Every 200 hours or annually",
        },
        MaintenanceRecommendation {
            id: "rec-8",
            product_type: PortableGenerator,
            maintenance_type: Special,
            description: "Use fresh fuel, drain if storing for more than 30 days",
            hours_interval: None,
            months_interval: None,
            interval_description: "As needed",
        },
        MaintenanceRecommendation {
            id: "rec-9",
            product_type: InverterGenerator,
            maintenance_type: Initial,
            description: "First oil change",
            hours_interval: Some(25),
            months_interval: None,
            interval_description: "First ~20-30 hours",
        },
        MaintenanceRecommendation {
            id: "rec-10",
            product_type: InverterGenerator,
            maintenance_type: Routine,
            description: "Oil change",
            hours_interval: Some(100),
            months_interval: Some(12),
            interval_description: "Every 100 hours or annually",
        },
        MaintenanceRecommendation {
            id: "rec-11",
            product_type: InverterGenerator,
            maintenance_type: LongTerm,
            description: "Air filter cleaning",
            hours_interval: Some(50),
            months_interval: None,
            interval_description: "Every 50 hours, replace at 200 hours",
        },
        MaintenanceRecommendation {
            id: "rec-12",
            product_type: InverterGenerator,
            maintenance_type: Special,
            description: "Store with stabilized fuel, clean carburetor if stored long-term",
            hours_interval: None,
            months_interval: None,
            interval_description: "As needed",
        },
        MaintenanceRecommendation {
            id: "rec-13",
            product_type: PressureWasher,
            maintenance_type: Initial,
            description: "First oil change",
            hours_interval: Some(5),
            months_interval: None,
            interval_description: "After ~5 hours",
        },
        MaintenanceRecommendation {
            id: "rec-14",
            product_type: PressureWasher,
            maintenance_type: Routine,
            description: "Engine oil change; air filter checks",
            hours_interval: None,
            months_interval: Some(12),
            interval_description: "Annually or per manual",
        },
        MaintenanceRecommendation {
            id: "rec-15",
            product_type: PressureWasher,
            maintenance_type: LongTerm,
            description: "Pump maintenance (if required)",
            hours_interval: None,
            months_interval: None,
            interval_description: "Per manufacturer's schedule",
        },
        MaintenanceRecommendation {
            id: "rec-16",
            product_type: PressureWasher,
            maintenance_type: Special,
            description: "Never run pump dry; flush after detergent use",
            hours_interval: None,
            months_interval: None,
            interval_description: "After each use",
        },
        MaintenanceRecommendation {
            id: "rec-17",
            product_type: WaterTrashPump,
            maintenance_type: Initial,
            description: "First oil change",
            hours_interval: Some(5),
            months_interval: None,
            interval_description: "After ~5 hours",
        },
        MaintenanceRecommendation {
            id: "rec-18",
            product_type: WaterTrashPump,
            maintenance_type: Routine,
            description: "Oil change",
            hours_interval: None,
            months_interval: Some(12),
            interval_description: "Annually or per hours listed in the manual",
        },
        MaintenanceRecommendation {
            id: "rec-19",
            product_type: WaterTrashPump,
            maintenance_type: LongTerm,
            description: "Inspect impeller & seals",
            hours_interval: None,
            months_interval: None,
            interval_description: "Periodically",
        },
        MaintenanceRecommendation {
            id: "rec-20",
            product_type: WaterTrashPump,
            maintenance_type: Special,
            description: "Drain water before storage to prevent freezing",
            hours_interval: None,
            months_interval: None,
            interval_description: "Before storage",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_product_type_has_four_ordered_entries() {
        let catalog = MaintenanceCatalog::standard();
        assert_eq!(catalog.recommendations().len(), 20);

        for product_type in ProductType::ordered() {
            let kinds: Vec<MaintenanceType> = catalog
                .for_product_type(product_type)
                .into_iter()
                .map(|rec| rec.maintenance_type)
                .collect();
            assert_eq!(
                kinds,
                [
                    MaintenanceType::Initial,
                    MaintenanceType::Routine,
                    MaintenanceType::LongTerm,
                    MaintenanceType::Special
                ],
                "{product_type} entries out of order"
            );
        }
    }

    #[test]
    fn routine_lookup_returns_first_routine_entry() {
        let routine = MaintenanceCatalog::standard()
            .routine_for(ProductType::HomeStandbyGenerator)
            .expect("standby generators have a routine entry");
        assert_eq!(routine.id, "rec-2");
        assert_eq!(routine.hours_interval, Some(200));
        assert_eq!(routine.months_interval, Some(24));
    }

    #[test]
    fn standard_catalog_is_shared() {
        assert!(std::ptr::eq(
            MaintenanceCatalog::standard(),
            MaintenanceCatalog::standard()
        ));
    }

    #[test]
    fn empty_catalog_has_no_routine_entries() {
        let catalog = MaintenanceCatalog::from_recommendations(Vec::new());
        assert!(catalog.routine_for(ProductType::PressureWasher).is_none());
    }

    #[test]
    fn serializes_month_interval_as_time_interval() {
        let routine = MaintenanceCatalog::standard()
            .routine_for(ProductType::PressureWasher)
            .unwrap();
        let value = serde_json::to_value(routine).unwrap();
        assert_eq!(value["timeInterval"], 12);
        assert_eq!(value["maintenanceType"], "Routine");
        assert!(value.get("hoursInterval").is_none());
    }
}
