use crate::db::OrmConn;

#[derive(Clone)]
pub struct AppState {
    pub orm: OrmConn,
    pub jwt_secret: String,
}

impl AppState {
    pub fn new(orm: OrmConn, jwt_secret: impl Into<String>) -> Self {
        Self {
            orm,
            jwt_secret: jwt_secret.into(),
        }
    }
}
