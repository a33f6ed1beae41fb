//! Texts the bot sends to users.

pub const START: &str =
    "Привет! Я бот для мониторинга ареалов обитания. Отправь мне фотографию и геометку!";

pub const HELP: &str = "Отправь фотографию птицы, а затем геометку места, где она сделана.\n\
\n\
/start - приветствие\n\
/help - эта справка\n\
/stats - ваша статистика наблюдений";

pub const DUPLICATE_PHOTO: &str =
    "Эта фотография уже была загружена. Пожалуйста, отправьте другую.";
pub const PHOTO_SAVED: &str = "Фото сохранено! Теперь отправь геометку.";
pub const PHOTO_SAVE_FAILED: &str = "Ошибка при сохранении фото";
pub const NOT_IDENTIFIED: &str = "Я не смог классифицировать эту птицу.";

pub const PHOTO_FIRST: &str = "Сначала отправьте фото";
pub const LOCATION_SAVE_FAILED: &str = "Ошибка при сохранении геометки";
pub const STATS_FAILED: &str = "Не удалось получить статистику";

pub fn identified(class_name: &str, percent: &str) -> String {
    format!("Это: {} с вероятностью {}%", class_name, percent)
}

/// Coordinates print in shortest round-trip form, whole degrees keep `.0` (`55.0, 37.0`).
pub fn location_saved(latitude: f64, longitude: f64) -> String {
    format!("Геометка сохранена: {:?}, {:?}", latitude, longitude)
}

pub fn stats(total: i64, identified: i64, classified: i64, geotagged: i64) -> String {
    format!(
        "Ваши наблюдения: {}\nОпределено птиц: {} из {}\nС геометкой: {}",
        total, identified, classified, geotagged
    )
}
