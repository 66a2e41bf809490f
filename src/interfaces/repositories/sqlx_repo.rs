use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxUserRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxProfileRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxJobRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxApplicationRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxForumRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxPptRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxEventRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxPlacementRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxNotificationRepo {
    pub pool: PgPool,
}
