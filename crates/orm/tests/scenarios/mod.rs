mod s2_equality_filter_by_method_index;
mod s4_integer_range_index;
mod s5_datetime_range_filter;
mod s6_reference_backlink;
