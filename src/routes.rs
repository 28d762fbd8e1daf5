use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

use crate::{
    api::{attendance, dashboard, employee},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter config
    fn build_limiter(requests_per_min: u32) -> GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware> {
        let rpm = requests_per_min.max(1);
        GovernorConfigBuilder::default()
            .per_millisecond((60_000 / rpm as u64).max(1))
            .burst_size(rpm)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap()
    }

    let login_limiter = build_limiter(config.rate_login_per_min);
    let signup_limiter = build_limiter(config.rate_signup_per_min);
    let refresh_limiter = build_limiter(config.rate_refresh_per_min);
    let protected_limiter = build_limiter(config.rate_protected_per_min);

    // Auth routes: signup/login/refresh are the only public endpoints;
    // logout and profile sit behind the same gate as everything else.
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/signup")
                    .wrap(Governor::new(&signup_limiter))
                    .route(web::post().to(handlers::signup)),
            )
            .service(
                web::resource("/login")
                    .wrap(Governor::new(&login_limiter))
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/token/refresh")
                    .wrap(Governor::new(&refresh_limiter))
                    .route(web::post().to(handlers::refresh_token)),
            )
            .service(
                web::scope("")
                    .wrap(from_fn(auth_middleware))
                    .service(web::resource("/logout").route(web::post().to(handlers::logout)))
                    .service(
                        web::resource("/profile")
                            .route(web::get().to(handlers::get_profile))
                            .route(web::put().to(handlers::update_profile))
                            .route(web::patch().to(handlers::update_profile)),
                    ),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope("")
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(Governor::new(&protected_limiter)) // rate limiting
            .service(
                web::scope("/employees")
                    // literal path must register before /{id}
                    .service(
                        web::resource("/check_unique")
                            .route(web::get().to(employee::check_unique)),
                    )
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee))
                            .route(web::patch().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    .service(web::resource("/mark").route(web::post().to(attendance::mark)))
                    .service(
                        web::resource("/today_stats")
                            .route(web::get().to(attendance::today_stats)),
                    )
                    .service(
                        web::resource("/by_employee")
                            .route(web::get().to(attendance::by_employee)),
                    )
                    .service(web::resource("/by_date").route(web::get().to(attendance::by_date)))
                    // /attendance with optional filters
                    .service(web::resource("").route(web::get().to(attendance::list))),
            )
            .service(web::resource("/dashboard/stats").route(web::get().to(dashboard::stats))),
    );
}

// LOGIN
//  ├─ access (15 min)
//  └─ refresh (7 days, revocable via jti blacklist)

// API REQUEST
//  └─ Authorization: Bearer access

// ACCESS EXPIRED
//  └─ POST /auth/token/refresh with refresh
//       └─ returns new access
