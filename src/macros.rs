#[macro_export]
macro_rules! param_list {
    // Empty list
    () => {
        $crate::ParamList::new()
    };

    // One or more elements, in order
    ($($element:expr),+ $(,)?) => {{
        let mut list = $crate::ParamList::new();
        $(
            list.push($element);
        )+
        list
    }};
}
