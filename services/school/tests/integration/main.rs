mod class_test;
mod db_test;
mod enrollment_test;
mod router_test;
