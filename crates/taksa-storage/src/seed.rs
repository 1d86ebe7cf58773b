// Reference data for drivers and houses
// Decision: Seed only into empty tables so restarts never duplicate rows

use taksa_core::DriverClass;

use crate::models::{CreateDriverRow, CreateHouseRow};

/// (name, phone, car, class)
const DRIVERS: &[(&str, &str, &str, DriverClass)] = &[
    ("Иванов Иван Иванович", "+7 (910) 123 45-67", "Toyota Camry", DriverClass::Econom),
    ("Петров Петр Петрович", "+7 (911) 234 56-78", "Honda Accord", DriverClass::Comfortable),
    ("Сидоров Сидор Сидорович", "+7 (912) 345 67-89", "Ford Focus", DriverClass::Business),
    ("Смирнов Смирнова Смирновна", "+7 (913) 456 78-90", "Chevrolet Malibu", DriverClass::Econom),
    ("Кузнецов Алексей Викторович", "+7 (914) 567 89-01", "Volkswagen Passat", DriverClass::Comfortable),
    ("Попов Артем Сергеевич", "+7 (915) 678 90-12", "Renault Duster", DriverClass::Business),
    ("Васильев Сергей Анатольевич", "+7 (916) 789 01-23", "Nissan Qashqai", DriverClass::Econom),
    ("Зайцев Андрей Олегович", "+7 (917) 890 12-34", "Kia Sportage", DriverClass::Comfortable),
    ("Михайлов Михаил Дмитриевич", "+7 (918) 901 23-45", "Subaru Forester", DriverClass::Business),
    ("Лебедев Игорь Николаевич", "+7 (919) 012 34-56", "Hyundai Tucson", DriverClass::Econom),
    ("Федоров Николай Юрьевич", "+7 (920) 123 45-67", "Mazda CX-5", DriverClass::Comfortable),
    ("Морозов Антон Павлович", "+7 (921) 234 56-78", "BMW 3 Series", DriverClass::Business),
    ("Соловьев Валерий Владимирович", "+7 (922) 345 67-89", "Mercedes-Benz C-Class", DriverClass::Econom),
    ("Чернов Виктор Игоревич", "+7 (923) 456 78-90", "Audi A4", DriverClass::Comfortable),
    ("Тихонов Вячеслав Сергеевич", "+7 (924) 567 89-01", "Lexus ES", DriverClass::Business),
    ("Петрова Ольга Ивановна", "+7 (925) 678 90-12", "Volkswagen Tiguan", DriverClass::Econom),
    ("Синицын Дмитрий Владимирович", "+7 (926) 789 01-23", "Skoda Kodiaq", DriverClass::Comfortable),
    ("Григорьев Денис Андреевич", "+7 (927) 890 12-34", "Opel Astra", DriverClass::Business),
    ("Ковалев Арсений Александрович", "+7 (928) 901 23-45", "Toyota RAV4", DriverClass::Econom),
    ("Николаев Роман Сергеевич", "+7 (929) 012 34-56", "Honda CR-V", DriverClass::Comfortable),
    ("Белов Василий Николаевич", "+7 (930) 123 45-67", "Nissan X-Trail", DriverClass::Business),
    ("Лысенко Сергей Иванович", "+7 (931) 234 56-78", "Ford Kuga", DriverClass::Econom),
    ("Костин Юрий Васильевич", "+7 (932) 345 67-89", "Citroën C4", DriverClass::Comfortable),
    ("Захаров Виктор Петрович", "+7 (933) 456 78-90", "Renault Koleos", DriverClass::Business),
    ("Романов Павел Игоревич", "+7 (934) 567 89-01", "Kia Seltos", DriverClass::Econom),
];

/// (street, building, number)
const HOUSES: &[(&str, Option<&str>, &str)] = &[
    ("ул. Ленина", Some("1"), "12A"),
    ("ул. Пушкина", None, "3"),
    ("ул. Гоголя", Some("2"), "45Б"),
    ("ул. Садовая", None, "17"),
    ("пр. Мира", Some("1"), "8"),
    ("ул. Красная", None, "101A"),
    ("ул. Октябрьская", Some("3"), "22"),
    ("ул. Комсомольская", None, "5"),
    ("ул. Советская", Some("1"), "19"),
    ("ул. Гагарина", Some("2"), "28"),
    ("ул. Тимирязева", None, "33"),
    ("ул. Беринга", Some("1"), "7A"),
    ("ул. Чехова", None, "14"),
    ("ул. Степана Разина", Some("1"), "26Б"),
    ("ул. Кленовая", None, "37"),
    ("ул. Полярная", Some("2"), "9"),
    ("ул. Лесная", None, "50А"),
    ("ул. Центральная", Some("1"), "11"),
    ("ул. Дружбы", None, "32"),
    ("ул. Уральская", Some("2"), "4"),
    ("ул. Ломоносова", None, "44"),
    ("ул. Солнечная", Some("1"), "30А"),
    ("ул. Новая", None, "18"),
    ("ул. Восточная", Some("1"), "25"),
    ("ул. Западная", None, "60Б"),
    ("ул. Ленина", None, "1"),
    ("ул. Пушкина", None, "2"),
    ("ул. Садовая", None, "3"),
    ("ул. Мира", None, "4А"),
    ("ул. Кирова", Some("1"), "5"),
    ("ул. Школьная", None, "6Б"),
    ("ул. Тихая", None, "7"),
    ("ул. Северная", None, "8"),
    ("ул. Южная", Some("2"), "9"),
    ("ул. Заречная", None, "10"),
    ("ул. Центральная", None, "11"),
    ("ул. Новая", None, "12"),
    ("ул. Красная", None, "13А"),
    ("ул. Солнечная", Some("3"), "14"),
    ("ул. Космическая", None, "15Б"),
    ("ул. Московская", None, "16"),
    ("ул. Лесная", None, "17"),
    ("ул. Речная", Some("1"), "18"),
    ("ул. Тюльпанная", None, "19"),
    ("ул. Зелёная", None, "20"),
    ("ул. Ясеневая", None, "21"),
    ("ул. Берёзовая", None, "22А"),
    ("ул. Фрунзе", None, "23"),
    ("ул. Гармония", Some("2"), "24"),
    ("ул. Промышленная", None, "25"),
    ("ул. Западная", None, "26Б"),
    ("ул. Восточная", None, "27"),
    ("ул. Широкая", None, "28"),
    ("ул. Кленовая", Some("3"), "29"),
    ("ул. Тихая", None, "30"),
    ("ул. Мирная", None, "31"),
    ("ул. Сосновая", None, "32"),
    ("ул. Рябиновая", None, "33А"),
    ("ул. Набережная", Some("1"), "34"),
    ("ул. Солнечная", None, "35"),
    ("ул. Тихая", None, "36"),
    ("ул. Лесная", None, "37Б"),
    ("ул. Космическая", None, "38"),
    ("ул. Новая", None, "39"),
    ("ул. Тихая", None, "40А"),
    ("ул. Садовая", None, "41"),
    ("ул. Центральная", None, "42"),
    ("ул. Гармония", Some("1"), "43"),
    ("ул. Фрунзе", None, "44"),
    ("ул. Широкая", None, "45Б"),
    ("ул. Заречная", None, "46"),
    ("ул. Красная", Some("2"), "47"),
    ("ул. Зелёная", None, "48"),
    ("ул. Кленовая", Some("3"), "49"),
    ("ул. Набережная", None, "50"),
];

pub fn drivers() -> Vec<CreateDriverRow> {
    DRIVERS
        .iter()
        .map(|(name, phone, car, driver_class)| CreateDriverRow {
            name: name.to_string(),
            phone: phone.to_string(),
            car: car.to_string(),
            driver_class: *driver_class,
        })
        .collect()
}

pub fn houses() -> Vec<CreateHouseRow> {
    HOUSES
        .iter()
        .map(|(street, building, number)| CreateHouseRow {
            street: street.to_string(),
            building: building.map(str::to_string),
            number: number.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_class_has_drivers() {
        let drivers = drivers();
        for class in DriverClass::ALL {
            assert!(drivers.iter().any(|d| d.driver_class == class));
        }
    }

    #[test]
    fn test_seed_phones_use_api_format() {
        for driver in drivers() {
            let bytes = driver.phone.as_bytes();
            assert_eq!(bytes.len(), 18, "{}", driver.phone);
            assert!(driver.phone.starts_with("+7 ("));
            assert_eq!(bytes[7], b')');
            assert_eq!(bytes[15], b'-');
        }
    }

    #[test]
    fn test_houses_include_buildingless_addresses() {
        let houses = houses();
        assert!(houses.iter().any(|h| h.building.is_none()));
        assert!(houses.iter().any(|h| h.building.is_some()));
    }
}
