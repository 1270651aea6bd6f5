mod audit_tests;
mod employee_tests;
mod health_tests;
mod reference_data_tests;
