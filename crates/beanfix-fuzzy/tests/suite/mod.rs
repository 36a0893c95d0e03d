mod similarity_props;
