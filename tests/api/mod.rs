mod blog_tests;
mod feature_tests;
mod health_tests;
mod notification_tests;
mod service_tests;
mod team_tests;
mod testimonial_tests;
